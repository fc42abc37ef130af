//! Tracing setup: stderr always, plus daily log files when `log_dir` is set.

use spire_core::{config::SpireConfig, shellexpand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Call once near the start of `main`. Keep the returned guard alive until
/// exit so buffered file output is flushed.
pub fn init(cfg: &SpireConfig) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter(&cfg.log_level));

    if cfg.log_dir.is_empty() {
        tracing_subscriber::registry().with(stderr_layer).init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(shellexpand(&cfg.log_dir), "spire.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter(&cfg.log_level));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Some(guard)
}
