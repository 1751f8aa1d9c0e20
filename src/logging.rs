//! File-based logging.
//!
//! The terminal belongs to the TUI, so `tracing` output goes to daily rolling
//! files in the configured log directory instead of stdout.

use std::fs;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Initialize the logging system.
///
/// Logs are written to `<dir>/<prefix>.YYYY-MM-DD` with daily rotation. The
/// `RUST_LOG` environment variable takes precedence over `settings.filter`.
///
/// Returns `None` when logging is disabled. Otherwise the returned guard must
/// be kept alive for as long as logs should be flushed.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    if !settings.enabled {
        return Ok(None);
    }

    fs::create_dir_all(&settings.dir)
        .with_context(|| format!("creating log directory {}", settings.dir.display()))?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &settings.dir, &settings.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .context("parsing log filter")?;

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(dir = %settings.dir.display(), "logging initialized");
    Ok(Some(guard))
}
