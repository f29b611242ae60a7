use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where diagnostic output goes.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Append to a file. Used by the full-screen UI, where stderr would
    /// corrupt the alternate screen.
    File(PathBuf),
    Disabled,
}

/// Default filter when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "parley=debug,tower_http=debug,info"
    } else {
        "info"
    }
}

pub fn init_tracing(verbose: bool, target: LogTarget) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| e as Box<dyn Error>),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| e as Box<dyn Error>)
        }
    }
}
