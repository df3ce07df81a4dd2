//! File logging.
//!
//! The dashboard owns the terminal, so tracing output goes to a daily file in
//! the XDG state dir (`weeklens.YYYY-MM-DD.log`, dated in UTC) and never to
//! stdout. `RUST_LOG` takes precedence over `[logging] level`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LoggingConfig, LOG_FILE_PREFIX, LOG_FILE_SUFFIX};
use crate::error::{Error, Result};

/// Flushes buffered log lines when dropped. Hold it for the life of `main`.
#[must_use = "dropping the guard stops log output"]
pub struct LoggingGuard {
    _worker: WorkerGuard,
}

/// Install the global subscriber writing to the state dir.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let dir = Config::state_dir();
    let appender = daily_appender(&dir, config.max_files)?;
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {e}")))?;

    tracing::info!(
        file = %Config::log_path().display(),
        level = %config.level,
        "Logging initialized"
    );
    Ok(LoggingGuard { _worker: worker })
}

/// Route test output through the test harness capture.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Daily appender in `dir`, pruning all but the newest `max_files` files.
fn daily_appender(dir: &Path, max_files: usize) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(max_files.max(1))
        .build(dir)
        .map_err(|e| Error::Config(format!("failed to create log appender: {e}")))
}
