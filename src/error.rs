use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rewrite pattern: {0}")]
    Pattern(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Source control error: {0}")]
    SourceControl(String),

    #[error("Failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        ReleaseError::Pattern(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a source control error with context
    pub fn source_control(msg: impl Into<String>) -> Self {
        ReleaseError::SourceControl(msg.into())
    }

    /// Attach the file path and the failed action to an I/O error
    pub fn file(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseError::File {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<regex::Error> for ReleaseError {
    fn from(err: regex::Error) -> Self {
        ReleaseError::pattern(err.to_string())
    }
}
