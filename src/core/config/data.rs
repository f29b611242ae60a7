use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::DEFAULT_REVEAL_INTERVAL;

pub const DEFAULT_BACKEND_URL: &str = "http://backend:8000/chat";
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Keys accepted by `parley set` / `parley unset`.
pub const CONFIG_KEYS: [&str; 5] = [
    "backend-url",
    "relay-url",
    "bind",
    "reveal-interval-ms",
    "relay-timeout-secs",
];

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chat backend the relay forwards to
    pub backend_url: Option<String>,
    /// Relay the chat client talks to
    pub relay_url: Option<String>,
    /// Listen address for `parley serve`
    pub bind: Option<String>,
    /// Delay between revealed characters, in milliseconds
    pub reveal_interval_ms: Option<u64>,
    /// Upper bound on the relay-to-backend call. Unset means no limit.
    pub relay_timeout_secs: Option<u64>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Flag (or environment, which clap folds into the flag) beats the file.
    pub fn resolve_backend_url(&self, flag: Option<&str>) -> String {
        flag.or(self.backend_url.as_deref())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .to_string()
    }

    pub fn resolve_relay_url(&self, flag: Option<&str>) -> String {
        flag.or(self.relay_url.as_deref())
            .unwrap_or(DEFAULT_RELAY_URL)
            .to_string()
    }

    pub fn resolve_bind(&self, flag: Option<&str>) -> Result<SocketAddr, String> {
        let raw = flag.or(self.bind.as_deref()).unwrap_or(DEFAULT_BIND);
        raw.parse()
            .map_err(|e| format!("Invalid bind address '{raw}': {e}"))
    }

    pub fn reveal_interval(&self) -> Duration {
        self.reveal_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REVEAL_INTERVAL)
    }

    pub fn relay_timeout(&self) -> Option<Duration> {
        self.relay_timeout_secs.map(Duration::from_secs)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for '{key}'"));
        }
        match key {
            "backend-url" => self.backend_url = Some(value.to_string()),
            "relay-url" => self.relay_url = Some(value.to_string()),
            "bind" => {
                value
                    .parse::<SocketAddr>()
                    .map_err(|e| format!("Invalid bind address '{value}': {e}"))?;
                self.bind = Some(value.to_string());
            }
            "reveal-interval-ms" => self.reveal_interval_ms = Some(parse_number(key, value)?),
            "relay-timeout-secs" => self.relay_timeout_secs = Some(parse_number(key, value)?),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), String> {
        match key {
            "backend-url" => self.backend_url = None,
            "relay-url" => self.relay_url = None,
            "bind" => self.bind = None,
            "reveal-interval-ms" => self.reveal_interval_ms = None,
            "relay-timeout-secs" => self.relay_timeout_secs = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, String> {
    value
        .parse()
        .map_err(|_| format!("'{key}' expects a whole number, got '{value}'"))
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key} (expected one of: {})",
        CONFIG_KEYS.join(", ")
    )
}
