use chrono::{DateTime, Utc};

use crate::core::constants::{SESSION_NAME_ELLIPSIS, SESSION_NAME_MAX_CHARS};
use crate::core::message::{Message, MessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named conversation thread. Messages are append-only.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, name: String) -> Self {
        Self {
            id,
            name,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends a message. The first message of a session fixes its name.
    pub(crate) fn push(&mut self, message: Message) {
        if self.messages.is_empty() && message.role.is_user() {
            self.name = name_from_text(&message.content);
        }
        self.messages.push(message);
    }

    pub(crate) fn message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|message| message.id == id)
    }
}

/// Derive a session name from the text that opened it.
///
/// Counts Unicode scalar values, so multi-byte text is never split.
pub fn name_from_text(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SESSION_NAME_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{SESSION_NAME_ELLIPSIS}")
    } else {
        head
    }
}
