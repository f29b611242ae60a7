//! Relay between chat clients and the upstream chat backend.
//!
//! The relay never reports upstream trouble to its caller. Any failure on the
//! backend hop is logged and answered with a locally built echo reply, so the
//! endpoint only fails when the client cannot reach it at all.

pub mod client;

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{BackendQuery, BackendReply, RelayReply, RelayRequest};

/// Why a backend call produced no usable reply.
#[derive(Debug)]
pub enum UpstreamError {
    /// Connection, TLS, timeout or body read failure.
    Transport(reqwest::Error),
    /// The backend answered with a non-success status.
    Status(StatusCode),
    /// The body was not a JSON object.
    Decode(serde_json::Error),
    /// The body parsed but had no reply text under any known field.
    MissingReply,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Transport(err) => write!(f, "backend unreachable: {err}"),
            UpstreamError::Status(status) => write!(f, "backend responded with status: {status}"),
            UpstreamError::Decode(err) => write!(f, "backend sent malformed JSON: {err}"),
            UpstreamError::MissingReply => {
                write!(f, "backend reply has neither `response` nor `message`")
            }
        }
    }
}

impl StdError for UpstreamError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            UpstreamError::Transport(err) => Some(err),
            UpstreamError::Decode(err) => Some(err),
            UpstreamError::Status(_) | UpstreamError::MissingReply => None,
        }
    }
}

/// Reply used when the backend could not answer.
pub fn fallback_reply(message: &str) -> String {
    format!(
        "Echo: {message} (The chat backend is unavailable, so this is a local fallback reply. \
Check the backend address the relay is configured with.)"
    )
}

#[derive(Clone, Debug)]
pub struct RelayService {
    client: reqwest::Client,
    backend_url: String,
    timeout: Option<Duration>,
}

impl RelayService {
    pub fn new(client: reqwest::Client, backend_url: impl Into<String>) -> Self {
        Self {
            client,
            backend_url: backend_url.into(),
            timeout: None,
        }
    }

    /// Bound the backend hop. Expiry is treated like any other upstream failure.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Answer one chat turn. Always produces a reply.
    pub async fn relay(&self, request: &RelayRequest) -> RelayReply {
        debug!(
            history_len = request.history.len(),
            backend = %self.backend_url,
            "forwarding chat message"
        );

        match self.forward(&request.message).await {
            Ok(message) => RelayReply { message },
            Err(err) => {
                warn!(error = %err, backend = %self.backend_url, "chat backend call failed, replying with echo");
                RelayReply {
                    message: fallback_reply(&request.message),
                }
            }
        }
    }

    /// Send `query` to the backend and extract its reply text.
    pub async fn forward(&self, query: &str) -> Result<String, UpstreamError> {
        let mut http_request = self
            .client
            .post(&self.backend_url)
            .header("Content-Type", "application/json")
            .json(&BackendQuery { query });

        if let Some(timeout) = self.timeout {
            http_request = http_request.timeout(timeout);
        }

        let response = http_request
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await.map_err(UpstreamError::Transport)?;
        let reply: BackendReply = serde_json::from_slice(&body).map_err(UpstreamError::Decode)?;
        reply.into_text().ok_or(UpstreamError::MissingReply)
    }
}
