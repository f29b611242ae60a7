//! Wire payloads for the relay endpoint and the upstream chat backend.

use serde::{Deserialize, Serialize};

use crate::core::message::Message;

/// Body of `POST /api/chat` as the relay reads it.
///
/// History entries stay raw JSON: clients shape their messages differently
/// (string or numeric ids, extra fields) and the relay never looks inside.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
}

/// Body of `POST /api/chat` as the chat client sends it.
#[derive(Debug, Serialize)]
pub struct ChatTurn<'a> {
    pub message: &'a str,
    pub history: &'a [Message],
}

/// Reply returned by the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayReply {
    pub message: String,
}

/// Body forwarded to the chat backend.
#[derive(Debug, Serialize)]
pub struct BackendQuery<'a> {
    pub query: &'a str,
}

/// Backend replies carry their text under `response` or, failing that, `message`.
#[derive(Debug, Default, Deserialize)]
pub struct BackendReply {
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl BackendReply {
    /// First non-empty string among the reply fields.
    pub fn into_text(self) -> Option<String> {
        [self.response, self.message]
            .into_iter()
            .flatten()
            .find_map(|value| match value {
                serde_json::Value::String(text) if !text.is_empty() => Some(text),
                _ => None,
            })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
