//! Send lifecycle for the conversation view.
//!
//! A send runs in two halves so the UI loop can stay the only owner of the
//! controller: [`ConversationController::begin_send`] performs the optimistic
//! update and hands back a [`PendingSend`], the caller performs the relay call
//! off-loop, and [`ConversationController::complete_send`] applies the result.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::constants::{EMPTY_REPLY_PLACEHOLDER, SEND_FAILED_MESSAGE};
use crate::core::message::{Message, MessageId};
use crate::core::session::{Session, SessionId};
use crate::core::store::SessionStore;

/// Anything that can answer a chat turn on behalf of the controller.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn send(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Arguments of the relay call captured by [`ConversationController::begin_send`].
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub session_id: SessionId,
    pub user_message_id: MessageId,
    pub message: String,
    /// Messages of the session before this send's user message.
    pub history: Vec<Message>,
}

#[derive(Debug, Default)]
pub struct ConversationController {
    store: SessionStore,
    in_flight: bool,
    error: Option<String>,
}

impl ConversationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[Session] {
        self.store.sessions()
    }

    pub fn current_session_id(&self) -> Option<SessionId> {
        self.store.current_id()
    }

    pub fn current_messages(&self) -> &[Message] {
        self.store.current_messages()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start over: the next send opens a new session.
    pub fn create_new_session(&mut self) {
        self.store.settle_reveals();
        self.store.deselect();
    }

    /// Switch to `id`. Unknown ids leave the selection untouched.
    pub fn select_session(&mut self, id: SessionId) -> bool {
        if self.store.current_id() == Some(id) {
            return false;
        }
        if self.store.get(id).is_none() {
            debug!(session = %id, "ignoring selection of unknown session");
            return false;
        }
        self.store.settle_reveals();
        self.store.select(id)
    }

    /// Optimistic half of a send. Returns `None` when the send is ignored.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let message = text.trim();
        if message.is_empty() || self.in_flight {
            return None;
        }

        let session_id = match self.store.current_id() {
            Some(id) => id,
            None => {
                let id = self.store.open_session(message);
                info!(session = %id, "opened new session");
                id
            }
        };

        let history = self
            .store
            .get(session_id)
            .map(|session| session.messages().to_vec())
            .unwrap_or_default();
        let user_message_id = self.store.append_user(session_id, message)?;

        self.error = None;
        self.in_flight = true;

        Some(PendingSend {
            session_id,
            user_message_id,
            message: message.to_string(),
            history,
        })
    }

    /// Apply the relay outcome for `pending`. Returns the assistant message id
    /// when a reply was appended.
    pub fn complete_send<E: std::fmt::Display>(
        &mut self,
        pending: PendingSend,
        result: Result<String, E>,
    ) -> Option<MessageId> {
        self.in_flight = false;
        match result {
            Ok(reply) => {
                let reply = if reply.is_empty() {
                    EMPTY_REPLY_PLACEHOLDER.to_string()
                } else {
                    reply
                };
                self.store.append_assistant(pending.session_id, &reply)
            }
            Err(err) => {
                info!(error = %err, session = %pending.session_id, "chat relay request failed");
                self.error = Some(SEND_FAILED_MESSAGE.to_string());
                None
            }
        }
    }

    /// Both halves of a send back to back, for callers without an event loop.
    pub async fn send_message(
        &mut self,
        relay: &dyn ChatRelay,
        text: &str,
    ) -> Option<MessageId> {
        let pending = self.begin_send(text)?;
        let result = relay.send(&pending.message, &pending.history).await;
        self.complete_send(pending, result)
    }

    /// Mark a reveal as done. Only the first call for a message has an effect.
    pub fn finish_reveal(&mut self, message_id: MessageId) -> bool {
        self.store.finish_reveal(message_id)
    }

    /// The message whose reveal is in progress, if any.
    pub fn revealing_message(&self) -> Option<(SessionId, &Message)> {
        self.store.revealing()
    }
}

#[cfg(test)]
mod tests;
