//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::cli::say::run_say;
use crate::core::config::data::CONFIG_KEYS;
use crate::core::config::Config;
use crate::relay::client::HttpRelayClient;
use crate::relay::RelayService;
use crate::server::serve;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogTarget};

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "A terminal chat client and relay for a conversational backend")]
#[command(
    long_about = "Parley is a full-screen terminal chat interface. Messages go to a relay \
(`parley serve`), which forwards them to the chat backend and answers with an echo when \
the backend cannot be reached.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Shift+Enter       New line in the input field\n\
  Ctrl+N            Start a new chat\n\
  Ctrl+Up/Down      Switch between chats\n\
  F1-F4             Send a suggested prompt (empty chat only)\n\
  Ctrl+B            Collapse or expand the chat list\n\
  PageUp/PageDown   Scroll the conversation\n\
  Esc, Ctrl+C       Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the relay the chat client talks to
    #[arg(long, global = true, value_name = "URL")]
    pub relay_url: Option<String>,

    /// Write diagnostics to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// More detailed diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Run the relay server
    Serve {
        /// Address to listen on
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
        /// Chat backend endpoint the relay forwards to
        #[arg(long, env = "PARLEY_BACKEND_URL", value_name = "URL")]
        backend_url: Option<String>,
    },
    /// Send one message through the relay and print the reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        value: String,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn log_target(command: &Commands, log_file: Option<PathBuf>) -> LogTarget {
    match (command, log_file) {
        (_, Some(path)) => LogTarget::File(path),
        // The chat screen owns the terminal.
        (Commands::Chat, None) => LogTarget::Disabled,
        (_, None) => LogTarget::Stderr,
    }
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);
    init_tracing(args.verbose, log_target(&command, args.log_file))?;

    let config = Config::load()?;

    match command {
        Commands::Chat => {
            let relay_url = config.resolve_relay_url(args.relay_url.as_deref());
            info!(relay = %relay_url, "starting chat");
            let relay = HttpRelayClient::new(reqwest::Client::new(), &relay_url);
            run_chat(Arc::new(relay), config.reveal_interval()).await
        }
        Commands::Serve { bind, backend_url } => {
            let addr = config.resolve_bind(bind.as_deref())?;
            let backend_url = config.resolve_backend_url(backend_url.as_deref());
            let relay = RelayService::new(reqwest::Client::new(), backend_url)
                .with_timeout(config.relay_timeout());
            serve(addr, relay).await
        }
        Commands::Say { text } => {
            let relay_url = config.resolve_relay_url(args.relay_url.as_deref());
            run_say(text, &relay_url).await
        }
        Commands::Set { key, value } => {
            let mut config = config;
            if let Err(e) = config.set_value(&key, &value) {
                eprintln!("❌ {e}");
                eprintln!("Available keys: {}", CONFIG_KEYS.join(", "));
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Set {key} to: {value}");
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = config;
            if let Err(e) = config.unset_value(&key) {
                eprintln!("❌ {e}");
                eprintln!("Available keys: {}", CONFIG_KEYS.join(", "));
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Unset {key}");
            config.print_all();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
