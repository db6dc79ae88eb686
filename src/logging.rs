//! Optional tracing setup for hosts that want the engine to own it.
//!
//! The engine is embedded in a UI host that may well install its own
//! subscriber first, so claiming the global slot must never panic: init
//! reports losing the race as an error the host can ignore.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EngineConfig;

/// Keeps the non-blocking file writer alive; dropping it flushes and stops
/// the background worker.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

pub fn file_logging_enabled() -> bool {
    std::env::var("ENABLE_FILE_LOGS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Install the engine's subscriber: stdout, plus a daily-rolling file layer
/// when `ENABLE_FILE_LOGS` is set. `Ok(None)` means stdout only. `Err` means
/// another subscriber already owns the global slot; in an embedding host
/// that is the normal case and safe to ignore.
pub fn init_tracing(config: &EngineConfig) -> Result<Option<FileLogGuard>, TryInitError> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);
    let base = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    let Some(log_dir) = file_log_dir() else {
        base.try_init()?;
        return Ok(None);
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "engine.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    base.with(file_layer).try_init()?;
    Ok(Some(FileLogGuard { _guard: guard }))
}

/// The writable file-log directory, or `None` when file logging is off or
/// the directory cannot be created (falls back to stdout only).
fn file_log_dir() -> Option<String> {
    if !file_logging_enabled() {
        return None;
    }
    let dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(err) => {
            eprintln!("failed to create log directory {dir}: {err}");
            None
        }
    }
}
