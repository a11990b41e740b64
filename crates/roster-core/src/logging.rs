//! Tracing setup.
//!
//! The TUI owns stdout, so logs go to `$ROSTER_HOME/roster.log` through a
//! non-blocking appender. The filter comes from `ROSTER_LOG` when set,
//! otherwise from `log_level` in the config.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{Config, paths};

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "ROSTER_LOG";

const LOG_FILE_NAME: &str = "roster.log";
const FALLBACK_DIRECTIVE: &str = "info";

/// Installs the global subscriber writing to the default log file.
///
/// The returned guard flushes pending lines on drop; keep it alive for the
/// lifetime of the program. Calling this twice keeps the first subscriber.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::roster_home(), config)
}

/// Installs the global subscriber writing to `dir/roster.log`.
///
/// # Errors
/// Returns an error if `dir` cannot be created.
pub fn init_in(dir: &Path, config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let directive = filter_directive(std::env::var(LOG_ENV).ok(), &config.log_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init();

    Ok(guard)
}

/// Picks the filter directive: environment first, then config, then "info".
fn filter_directive(env: Option<String>, configured: &str) -> String {
    env.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            let configured = configured.trim();
            (!configured.is_empty()).then(|| configured.to_string())
        })
        .unwrap_or_else(|| FALLBACK_DIRECTIVE.to_string())
}
