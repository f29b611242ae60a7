//! Shared constants used across the application

use std::time::Duration;

/// Session names keep at most this many characters of the first message.
pub const SESSION_NAME_MAX_CHARS: usize = 25;

/// Appended to session names that were cut at [`SESSION_NAME_MAX_CHARS`].
pub const SESSION_NAME_ELLIPSIS: &str = "...";

/// Delay between revealed characters of an assistant reply.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(25);

/// Shown in the error banner when the relay could not be reached.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Substituted when the relay answers with an empty reply.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Sorry, I could not process your request.";

/// Placeholder headline for a conversation without messages.
pub const EMPTY_STATE_HEADLINE: &str = "How can I help you today?";

/// Prompts offered while the current conversation is empty.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "My name is Yusif. Based on my personal details on file, suggest places worth visiting in the city I live in.",
    "I'd like to know my balance. My name is Ali. Convert it from dollars to manat at the current rate.",
    "My name is Orkhan. How many days are left until my birthday? Use today's date for the calculation.",
    "Give me tips that will help with my daily routine.",
];
