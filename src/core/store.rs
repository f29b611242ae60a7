use crate::core::message::{Message, MessageId};
use crate::core::session::{name_from_text, Session, SessionId};

/// In-memory collection of chat sessions plus the current selection.
///
/// Sessions are kept newest-first. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    current: Option<SessionId>,
    next_session_id: u64,
    next_message_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.current
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == id)
    }

    fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|session| session.id == id)
    }

    /// Messages of the current session, or an empty slice when nothing is selected.
    pub fn current_messages(&self) -> &[Message] {
        self.current().map(Session::messages).unwrap_or(&[])
    }

    /// Deselect so that the next send opens a fresh session.
    pub fn deselect(&mut self) {
        self.current = None;
    }

    /// Select `id` if it names a stored session. Returns false for unknown ids.
    pub fn select(&mut self, id: SessionId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.current = Some(id);
        true
    }

    /// Create a session named after `first_text`, put it first and select it.
    pub fn open_session(&mut self, first_text: &str) -> SessionId {
        self.next_session_id += 1;
        let id = SessionId(self.next_session_id);
        self.sessions
            .insert(0, Session::new(id, name_from_text(first_text)));
        self.current = Some(id);
        id
    }

    fn next_message_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        MessageId(self.next_message_id)
    }

    pub fn append_user(&mut self, session_id: SessionId, content: &str) -> Option<MessageId> {
        let id = self.next_message_id();
        let session = self.get_mut(session_id)?;
        session.push(Message::user(id, content));
        Some(id)
    }

    /// Append a revealing assistant reply. Any older reveal is settled first so
    /// only the newest assistant message can be revealing.
    pub fn append_assistant(&mut self, session_id: SessionId, content: &str) -> Option<MessageId> {
        self.get(session_id)?;
        self.settle_reveals();
        let id = self.next_message_id();
        let session = self.get_mut(session_id)?;
        session.push(Message::assistant(id, content));
        Some(id)
    }

    /// Clear the reveal flag of `message_id`. Returns true only for the one
    /// call that actually flips the flag.
    pub fn finish_reveal(&mut self, message_id: MessageId) -> bool {
        for session in &mut self.sessions {
            if let Some(message) = session.message_mut(message_id) {
                if message.revealing {
                    message.revealing = false;
                    return true;
                }
                return false;
            }
        }
        false
    }

    /// The message currently being revealed, if any.
    pub fn revealing(&self) -> Option<(SessionId, &Message)> {
        self.sessions.iter().find_map(|session| {
            session
                .messages()
                .iter()
                .rev()
                .find(|message| message.revealing)
                .map(|message| (session.id, message))
        })
    }

    /// Finish every reveal still in progress.
    pub fn settle_reveals(&mut self) -> Vec<MessageId> {
        let pending: Vec<MessageId> = self
            .sessions
            .iter()
            .flat_map(|session| session.messages())
            .filter(|message| message.revealing)
            .map(|message| message.id)
            .collect();
        for id in &pending {
            self.finish_reveal(*id);
        }
        pending
    }
}
