//! Error types for govform core
//!
//! Not-found and validation outcomes are ordinary return values
//! (`Option::None`, [`SubmitOutcome::Rejected`](crate::SubmitOutcome)). What
//! remains here are request-shape problems and failures of the layers below.

use govform_assist::LlmError;
use govform_store::StoreError;

/// Main service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request is missing required parts
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Writing a document failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// AI service call failed
    #[error("assist error: {0}")]
    Assist(#[from] LlmError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// Check if the caller sent a bad request, as opposed to an internal failure
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
