pub mod config;
pub mod dashboard;
pub mod error;
pub mod logs;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize tracing/logging to stderr
///
/// Note: This function can only be called once. `RUST_LOG` takes precedence
/// over the configured level.
pub fn init_tracing(cfg: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(&cfg.level));

    if cfg.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// Initialize tracing to the configured log file
///
/// Used while the dashboard owns the terminal. Returns `None` and installs no
/// subscriber when no file is configured, leaving every tracing call a no-op.
/// The returned guard must be held until shutdown so buffered lines are flushed.
pub fn init_file_tracing(cfg: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let Some(file) = cfg.file.as_deref() else {
        return Ok(None);
    };

    let path = Path::new(file);
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", file))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let registry = tracing_subscriber::registry().with(env_filter(&cfg.level));
    if cfg.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer))
            .init();
    }

    Ok(Some(guard))
}
