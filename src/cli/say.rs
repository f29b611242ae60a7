//! TUI-less "say" command

use std::error::Error;

use tracing::debug;

use crate::core::controller::{ChatRelay, ConversationController};
use crate::relay::client::HttpRelayClient;

/// Send one message through the relay and print the reply.
pub async fn run_say(prompt: Vec<String>, relay_url: &str) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("Usage: parley say <message>".into());
    }

    let client = HttpRelayClient::new(reqwest::Client::new(), relay_url);
    debug!(url = client.chat_url(), "sending one-shot message");

    let mut controller = ConversationController::new();
    let reply = say_once(&mut controller, &client, &prompt).await?;
    println!("{reply}");
    Ok(())
}

/// Drive a single send through `controller` and return the reply text.
pub(crate) async fn say_once(
    controller: &mut ConversationController,
    relay: &dyn ChatRelay,
    prompt: &str,
) -> Result<String, Box<dyn Error>> {
    match controller.send_message(relay, prompt).await {
        Some(reply_id) => {
            controller.finish_reveal(reply_id);
            controller
                .current_messages()
                .iter()
                .find(|message| message.id == reply_id)
                .map(|message| message.content.clone())
                .ok_or_else(|| "reply went missing".into())
        }
        None => Err(controller
            .error()
            .unwrap_or("Nothing to send")
            .to_string()
            .into()),
    }
}
