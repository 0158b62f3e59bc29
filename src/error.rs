//! Error types for report generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading configuration or reading inputs
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid scheduler source '{0}': expected NAME=DIR")]
    InvalidSchedulerSpec(String),
}

impl ReportError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ReportError::io(
            "input_files/test1.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("input_files/test1.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_invalid_scheduler_spec_message() {
        let err = ReportError::InvalidSchedulerSpec("RR".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid scheduler source 'RR': expected NAME=DIR"
        );
    }
}
