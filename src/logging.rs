//! Tracing setup. The terminal belongs to the UI, so everything goes to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Environment variable holding a filter directive that beats the config file.
pub const LOG_ENV: &str = "CADENZA_LOG";

fn filter_for(from_env: Option<&str>, configured: &str) -> EnvFilter {
    from_env
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber and return the log file path.
pub fn init(settings: &LoggingSettings) -> io::Result<PathBuf> {
    let path = settings.file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let from_env = std::env::var(LOG_ENV).ok();
    let filter = filter_for(from_env.as_deref(), &settings.filter);

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();

    Ok(path)
}
