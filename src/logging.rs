//! Log file setup.
//!
//! The TUI owns the terminal, so logs go to `~/.mochi/logs/mochi.log`.
//! Filter precedence: `MOCHI_LOG` (via [`Config::log_level`]) > default `info`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::MOCHI_DIR;
use crate::config::Config;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "mochi.log";

/// Default log directory: ~/.mochi/logs
pub fn log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(MOCHI_DIR).join(LOG_DIR))
}

/// Build the filter for a configured level, falling back to `info` when the
/// directive does not parse.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `dir/mochi.log`.
///
/// The returned guard must be held for the life of the program so buffered
/// lines are flushed. Returns `None` when logging could not be set up; the
/// program runs without logs in that case.
pub fn init_in(dir: &Path, config: &Config) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Warning: could not create log directory {}: {}", dir.display(), e);
        return None;
    }

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::registry()
        .with(build_filter(&config.log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    match result {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

/// Install the global subscriber in the default log directory.
pub fn init(config: &Config) -> Option<WorkerGuard> {
    let dir = log_dir()?;
    init_in(&dir, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        let filter = build_filter("mochi=debug,reqwest=warn").to_string();
        assert!(filter.contains("mochi=debug"));
        assert!(filter.contains("reqwest=warn"));
    }

    #[test]
    fn test_build_filter_falls_back_on_garbage() {
        let filter = build_filter("mochi=loudest");
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_log_dir_under_mochi_dir() {
        if let Some(dir) = log_dir() {
            assert!(dir.ends_with(".mochi/logs"));
        }
    }
}
