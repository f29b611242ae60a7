use crate::core::config::data::{path_display, Config, DEFAULT_BACKEND_URL, DEFAULT_BIND, DEFAULT_RELAY_URL};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        if let Ok(path) = Config::get_config_path() {
            println!("  (file: {})", path_display(path));
        }
        print_entry("backend-url", self.backend_url.as_deref(), DEFAULT_BACKEND_URL);
        print_entry("relay-url", self.relay_url.as_deref(), DEFAULT_RELAY_URL);
        print_entry("bind", self.bind.as_deref(), DEFAULT_BIND);
        println!("  reveal-interval-ms: {}", self.reveal_interval().as_millis());
        match self.relay_timeout_secs {
            Some(secs) => println!("  relay-timeout-secs: {secs}"),
            None => println!("  relay-timeout-secs: (unset, no limit)"),
        }
    }
}

fn print_entry(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(value) => println!("  {key}: {value}"),
        None => println!("  {key}: {default} (default)"),
    }
}
