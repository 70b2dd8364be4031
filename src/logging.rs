//! File-backed tracing setup
//!
//! The terminal belongs to the UI, so log lines go to a file or nowhere.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `RUST_LOG` wins over `level` when set.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install a global subscriber appending to `log_file`. Without a file no
/// subscriber is installed and `tracing` macros are no-ops.
pub fn init(log_file: Option<&Path>, level: &str) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_is_noop() {
        assert!(init(None, DEFAULT_LOG_LEVEL).is_ok());
    }

    #[test]
    fn test_init_reports_unopenable_file() {
        let missing = Path::new("/nonexistent-dir/pokegraph/log.txt");
        let error = init(Some(missing), DEFAULT_LOG_LEVEL).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
