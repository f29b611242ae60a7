//! Character-by-character reveal of assistant replies.
//!
//! [`RevealFrames`] is the pure view of the effect: the growing prefixes of a
//! text. [`Revealer`] drives it in time. Each started reveal gets a
//! [`RevealHandle`] owning a tokio task that ticks once per interval and
//! reports progress on a shared channel, tagged with a reveal id so events
//! from a superseded reveal can be told apart and dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::message::MessageId;

/// Lazy sequence of growing prefixes of a text, one character at a time.
pub struct RevealFrames<'a> {
    text: &'a str,
    chars: std::str::CharIndices<'a>,
}

impl<'a> RevealFrames<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices(),
        }
    }
}

impl<'a> Iterator for RevealFrames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let (index, ch) = self.chars.next()?;
        Some(&self.text[..index + ch.len_utf8()])
    }
}

/// The frame of `text` after `shown` ticks: its first `shown` characters.
pub fn revealed_prefix(text: &str, shown: usize) -> &str {
    if shown == 0 {
        return "";
    }
    RevealFrames::new(text).take(shown).last().unwrap_or(text)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    Advance { message_id: MessageId, shown: usize },
    Completed { message_id: MessageId },
}

/// A running reveal. Cancelled on [`RevealHandle::cancel`] or drop; after
/// that the task sends nothing more.
pub struct RevealHandle {
    message_id: MessageId,
    reveal_id: u64,
    cancel_token: CancellationToken,
}

impl RevealHandle {
    pub fn spawn(
        message_id: MessageId,
        reveal_id: u64,
        text: &str,
        interval: Duration,
        tx: mpsc::UnboundedSender<(RevealEvent, u64)>,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let total = text.chars().count();

        tokio::spawn(async move {
            for shown in 1..=total {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(interval) => {}
                }
                if tx
                    .send((RevealEvent::Advance { message_id, shown }, reveal_id))
                    .is_err()
                {
                    return;
                }
            }
            if !token.is_cancelled() {
                let _ = tx.send((RevealEvent::Completed { message_id }, reveal_id));
            }
        });

        Self {
            message_id,
            reveal_id,
            cancel_token,
        }
    }

    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    pub fn reveal_id(&self) -> u64 {
        self.reveal_id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Outcome of feeding one event to a [`Revealer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealUpdate {
    /// Stale or unknown event, nothing changed.
    Ignored,
    Advanced,
    /// The reveal finished. Reported once per reveal.
    Completed(MessageId),
}

/// Owns at most one active reveal and the channel its task reports on.
pub struct Revealer {
    interval: Duration,
    tx: mpsc::UnboundedSender<(RevealEvent, u64)>,
    active: Option<(RevealHandle, usize)>,
    next_reveal_id: u64,
}

impl Revealer {
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<(RevealEvent, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                interval,
                tx,
                active: None,
                next_reveal_id: 0,
            },
            rx,
        )
    }

    /// Begin revealing `text`, replacing any reveal in progress.
    pub fn start(&mut self, message_id: MessageId, text: &str) {
        self.cancel();
        self.next_reveal_id += 1;
        debug!(message = %message_id, reveal = self.next_reveal_id, "starting reveal");
        let handle = RevealHandle::spawn(
            message_id,
            self.next_reveal_id,
            text,
            self.interval,
            self.tx.clone(),
        );
        self.active = Some((handle, 0));
    }

    pub fn cancel(&mut self) {
        if let Some((handle, _)) = self.active.take() {
            handle.cancel();
        }
    }

    pub fn active_message(&self) -> Option<MessageId> {
        self.active.as_ref().map(|(handle, _)| handle.message_id())
    }

    /// Characters shown so far for `message_id`, if it is the active reveal.
    pub fn shown(&self, message_id: MessageId) -> Option<usize> {
        self.active
            .as_ref()
            .filter(|(handle, _)| handle.message_id() == message_id)
            .map(|(_, shown)| *shown)
    }

    pub fn apply(&mut self, event: RevealEvent, reveal_id: u64) -> RevealUpdate {
        let Some((handle, shown)) = self.active.as_mut() else {
            return RevealUpdate::Ignored;
        };
        if handle.reveal_id() != reveal_id {
            return RevealUpdate::Ignored;
        }

        match event {
            RevealEvent::Advance { shown: next, .. } => {
                *shown = next;
                RevealUpdate::Advanced
            }
            RevealEvent::Completed { message_id } => {
                self.active = None;
                RevealUpdate::Completed(message_id)
            }
        }
    }
}
