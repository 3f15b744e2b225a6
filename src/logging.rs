//! Tracing setup.
//!
//! The terminal owns stdout, so events go to `judgeflow.log` in the platform
//! data directory (or the temp dir). `RUST_LOG` wins over the configured filter.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "judgeflow.log";

/// Where the log file lives.
pub fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("judgeflow"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE)
}

/// Install the global subscriber. Returns the log path, or `None` when the
/// file could not be opened (logging is then disabled).
pub fn init(default_filter: &str) -> Option<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .ok()?;

    tracing::info!("judgeflow {} starting", env!("CARGO_PKG_VERSION"));
    Some(path)
}
