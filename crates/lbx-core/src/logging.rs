//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to daily-rolling files under
//! ${LBX_HOME}/logs. `RUST_LOG` controls the filter (default `info`).

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to `logs_dir`.
///
/// The returned guard must be held for the lifetime of the process;
/// dropping it flushes and stops the background writer.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, "lbx.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // Default filter covers our crates only; RUST_LOG overrides it
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lbx=info,lbx_core=info,lbx_tui=info"));

    // try_init: a second call (e.g. from tests) is not an error worth failing on
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(guard)
}
