//! Error types for Note Searcher.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Callers above the index layer treat them as opaque: an operation either
//! succeeded or failed, and the failure is forwarded as-is.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all Note Searcher operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Directory walk failed part way through
    #[error("Failed to walk {path}: {reason}")]
    Walk { path: PathBuf, reason: String },

    /// Full-text index could not be built or queried
    #[error("Index error: {reason}")]
    IndexError { reason: String },

    /// External search backend failed
    #[error("Search backend `{command}` failed: {reason}")]
    SubprocessError { command: String, reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a directory walk error
    pub fn walk(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Walk {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an index error
    pub fn index_error(reason: impl Into<String>) -> Self {
        Error::IndexError {
            reason: reason.into(),
        }
    }

    /// Create a subprocess error
    pub fn subprocess(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SubprocessError {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::file_not_found("/path/to/file");
        assert!(err.to_string().contains("File not found"));

        let err = Error::subprocess("java", "exit status 1");
        assert_eq!(
            err.to_string(),
            "Search backend `java` failed: exit status 1"
        );
    }

    #[test]
    fn test_error_messages() {
        let cases = [
            (Error::walk("/notes", "loop"), "Failed to walk /notes: loop"),
            (Error::index_error("bad schema"), "Index error: bad schema"),
            (Error::config_error("not json"), "Configuration error: not json"),
            (Error::other("boom"), "Error: boom"),
        ];
        for (err, message) in cases {
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
