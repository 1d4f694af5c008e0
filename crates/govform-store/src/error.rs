//! Error types for the document stores

use std::path::PathBuf;

/// Errors raised while persisting a document
///
/// Read failures never reach callers of the stores; they are masked as an
/// empty document. These errors surface from writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error on the backing file
    #[error("io error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failure reported by a [`DocumentBackend`](crate::DocumentBackend)
    /// implementation outside this crate, such as a remote store or a test double
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = StoreError::io_error(
            "data/submissions.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "io error on data/submissions.json: denied");
    }

    #[test]
    fn backend_error_display() {
        let err = StoreError::Backend("bucket unavailable".to_string());
        assert_eq!(err.to_string(), "backend error: bucket unavailable");
    }

    #[test]
    fn serde_error_conversion() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: StoreError = source.into();
        assert!(matches!(err, StoreError::Serialize(_)));
    }
}
