use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("No version declaration found in any manifest matching '{pattern}'")]
    NoVersionFound { pattern: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest discovery failed: {0}")]
    Glob(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create an I/O error tied to the file that caused it
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ReleaseError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a discovery error with context
    pub fn glob(msg: impl Into<String>) -> Self {
        ReleaseError::Glob(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("bad changelog table");
        assert_eq!(err.to_string(), "Configuration error: bad changelog table");
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ReleaseError::io("crates/a/Cargo.toml", io_err);
        let msg = err.to_string();
        assert!(msg.starts_with("I/O error on crates/a/Cargo.toml"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_no_version_found_names_pattern() {
        let err = ReleaseError::NoVersionFound {
            pattern: "**/Cargo.toml".to_string(),
        };
        assert!(err.to_string().contains("**/Cargo.toml"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::version("x"), "Version parsing error"),
            (ReleaseError::glob("x"), "Manifest discovery failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
