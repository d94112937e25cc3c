use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "KEYLINE_LOG";

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyline")
}

/// Install the file logger. The terminal belongs to the UI, so nothing is
/// written to stderr. Keep the returned guard alive until exit or buffered
/// lines are lost.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir).ok()?;
    let file_appender = tracing_appender::rolling::never(&dir, "keyline.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}
