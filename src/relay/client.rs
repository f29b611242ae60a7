use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::{ChatTurn, RelayReply};
use crate::core::controller::ChatRelay;
use crate::core::message::Message;
use crate::utils::url::construct_api_url;

/// Path of the chat route on the relay.
pub const CHAT_ROUTE: &str = "api/chat";

/// Failures between the chat client and the relay itself.
#[derive(Debug)]
pub enum RelayClientError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(reqwest::Error),
}

impl fmt::Display for RelayClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayClientError::Transport(err) => write!(f, "relay unreachable: {err}"),
            RelayClientError::Status(status) => write!(f, "HTTP error! status: {status}"),
            RelayClientError::Decode(err) => write!(f, "relay sent an unreadable reply: {err}"),
        }
    }
}

impl StdError for RelayClientError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RelayClientError::Transport(err) | RelayClientError::Decode(err) => Some(err),
            RelayClientError::Status(_) => None,
        }
    }
}

/// Talks to a running `parley serve` over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    chat_url: String,
}

impl HttpRelayClient {
    pub fn new(client: reqwest::Client, relay_url: &str) -> Self {
        Self {
            client,
            chat_url: construct_api_url(relay_url, CHAT_ROUTE),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub async fn post_chat(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<RelayReply, RelayClientError> {
        let request = ChatTurn { message, history };

        let response = self
            .client
            .post(&self.chat_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(RelayClientError::Transport)?;

        if !response.status().is_success() {
            return Err(RelayClientError::Status(response.status()));
        }

        response
            .json::<RelayReply>()
            .await
            .map_err(RelayClientError::Decode)
    }
}

#[async_trait]
impl ChatRelay for HttpRelayClient {
    async fn send(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<String, Box<dyn StdError + Send + Sync>> {
        let reply = self.post_chat(message, history).await?;
        Ok(reply.message)
    }
}
