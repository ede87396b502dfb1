//! Tracing subscriber setup for the binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binaries. The headless CLI logs to stderr. The terminal UI owns the
//! screen, so it logs to a file or not at all.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{VizError, VizResult};

/// Where log lines go when no file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Write to stderr.
    Stderr,
    /// Drop log output.
    Silent,
}

/// Build the event filter: `RUST_LOG` wins over the configured level.
///
/// # Errors
///
/// Returns a configuration error if the configured directive is invalid.
pub fn filter(config: &LoggingConfig) -> VizResult<EnvFilter> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| VizError::config(format!("invalid log level '{}': {e}", config.level)))
}

/// Install the global subscriber.
///
/// Returns `false` when nothing was installed: output is silent, or another
/// subscriber was already set.
///
/// # Errors
///
/// Returns an error if the filter is invalid or the log file cannot be
/// opened.
pub fn init(config: &LoggingConfig, fallback: Fallback) -> VizResult<bool> {
    let filter = filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (&config.file, fallback) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
        (None, Fallback::Stderr) => builder.with_writer(std::io::stderr).try_init().is_ok(),
        (None, Fallback::Silent) => false,
    };
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let config = LoggingConfig {
            level: "sortviz=debug,warn".to_string(),
            file: None,
        };
        assert!(filter(&config).is_ok());
    }

    #[test]
    fn test_filter_rejects_garbage() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "sortviz=loud".to_string(),
            file: None,
        };
        assert!(matches!(filter(&config), Err(VizError::Config { .. })));
    }

    #[test]
    fn test_silent_without_file_installs_nothing() {
        let config = LoggingConfig::default();
        assert!(!init(&config, Fallback::Silent).expect("valid config"));
    }
}
