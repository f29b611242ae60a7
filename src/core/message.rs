use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(format!("invalid message role: {value}")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// Opaque message identifier. Ids come from a per-store counter, so ordering
/// them is the same as ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    /// Set while the reveal effect is still typing this message out.
    #[serde(rename = "isTyping", default, skip_serializing_if = "is_false")]
    pub revealing: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Message {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role: Role::User,
            timestamp: Utc::now(),
            revealing: false,
        }
    }

    /// Assistant replies start out revealing.
    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role: Role::Assistant,
            timestamp: Utc::now(),
            revealing: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_wire_strings() {
        assert_eq!(Role::try_from("user"), Ok(Role::User));
        assert_eq!(Role::try_from("assistant"), Ok(Role::Assistant));
        assert!(Role::try_from("system").is_err());
        assert_eq!(String::from(Role::Assistant), "assistant");
    }

    #[test]
    fn revealing_flag_serializes_as_is_typing_only_when_set() {
        let mut message = Message::assistant(MessageId(7), "Hi there");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["isTyping"], true);
        assert_eq!(json["id"], 7);

        message.revealing = false;
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("isTyping").is_none());
    }

    #[test]
    fn history_entries_parse_without_typing_flag() {
        let raw = r#"{"id":1,"content":"Hello","role":"user","timestamp":"2024-05-01T12:00:00Z"}"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.role, Role::User);
        assert!(!message.revealing);
    }
}
