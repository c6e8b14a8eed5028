use crate::app::config::{AppConfig, LogConfig};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

/// Handle to keep the logging worker thread alive
pub struct LogGuard {
    // Kept alive until dropped
    _guard: WorkerGuard,
}

/// Unknown level names fall back to INFO
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

pub fn log_path(config: &LogConfig) -> PathBuf {
    config
        .file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(AppConfig::get_log_path)
}

/// Log to a file. The terminal belongs to the UI, so nothing goes to stderr.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    let path = log_path(config);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }

    let file =
        File::create(&path).with_context(|| format!("Failed to create log file: {:?}", path))?;
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(file);

    // RUST_LOG takes precedence
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(&config.level).into())
        .from_env_lossy();

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No colors in file
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(level = %config.level, path = ?path, "logging initialized");

    Ok(LogGuard {
        _guard: worker_guard,
    })
}
