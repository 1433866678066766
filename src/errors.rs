//! Typed error definitions for blueprints.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Taxonomy:
//! - connection failures abort before any transfer
//! - not-found and permission errors are fatal for the invocation
//! - transfer errors are per-item; multi-file runs log and skip them

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("Failed to connect to {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },

    #[error("Not found: {location}")]
    NotFound { location: String },

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Transfer of {name} failed: {reason}")]
    Transfer {
        name: String,
        reason: String,
        transient: bool,
    },

    #[error("{op} '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl BlueprintError {
    /// Classify an `io::Error` raised while performing `op` on `path`.
    pub fn from_io(op: &'static str, path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => BlueprintError::NotFound {
                location: path.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => BlueprintError::PermissionDenied {
                path: path.to_path_buf(),
                context: op.to_string(),
            },
            _ => BlueprintError::Io {
                op,
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            BlueprintError::Connection { .. } => 10,
            BlueprintError::NotFound { .. } => 20,
            BlueprintError::PermissionDenied { .. } => 21,
            BlueprintError::InvalidPattern { .. } => 30,
            BlueprintError::InvalidInput { .. } => 31,
            BlueprintError::Transfer { .. } => 40,
            BlueprintError::Io { .. } => 41,
            BlueprintError::Interrupted => 50,
        }
    }

    /// Short machine-friendly kind, paired with `code()` in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BlueprintError::Connection { .. } => "connection",
            BlueprintError::NotFound { .. } => "not_found",
            BlueprintError::PermissionDenied { .. } => "permission_denied",
            BlueprintError::InvalidPattern { .. } => "invalid_pattern",
            BlueprintError::InvalidInput { .. } => "invalid_input",
            BlueprintError::Transfer { .. } => "transfer",
            BlueprintError::Io { .. } => "io",
            BlueprintError::Interrupted => "interrupted",
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BlueprintError::Transfer { transient, .. } => *transient,
            BlueprintError::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
            BlueprintError::Connection { .. }
            | BlueprintError::NotFound { .. }
            | BlueprintError::PermissionDenied { .. }
            | BlueprintError::InvalidPattern { .. }
            | BlueprintError::InvalidInput { .. }
            | BlueprintError::Interrupted => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_is_classified() {
        let err = BlueprintError::from_io(
            "open",
            Path::new("missing.csv"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, BlueprintError::NotFound { .. }));
        assert_eq!(err.kind(), "not_found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn timed_out_io_is_retryable() {
        let err = BlueprintError::from_io(
            "write",
            Path::new("out.csv"),
            io::Error::from(io::ErrorKind::TimedOut),
        );
        assert!(err.is_retryable());
        assert_eq!(err.code(), 41);
    }
}
