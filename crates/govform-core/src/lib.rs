//! govform Core
//!
//! Request layer tying the form catalogue, the document stores and the
//! optional AI assist together.
//!
//! A submission moves through two states. Drafts are always stored, with any
//! field errors recorded alongside. Completing a submission requires every
//! template field to validate and, when AI assistance is configured, a
//! passing semantic review. A refused completion writes nothing.
//!
//! # Example
//!
//! ```rust,no_run
//! use govform_core::{FormService, GovformConfig, SubmitRequest};
//!
//! # async fn example() -> Result<(), govform_core::ServiceError> {
//! let service = FormService::from_config(&GovformConfig::from_env())?;
//!
//! let outcome = service
//!     .submit(SubmitRequest::new("W-4", Default::default()))
//!     .await?;
//! println!("{}", outcome.to_json());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod service;

// Re-exports
pub use config::{AssistConfig, GovformConfig};
pub use error::{ServiceError, ServiceResult};
pub use service::{
    FormLookup, FormService, Rejection, SubmitOutcome, SubmitRequest, AI_REVIEW_MESSAGE,
    FIELD_ERRORS_MESSAGE,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for service users
    pub use crate::{
        FormLookup, FormService, GovformConfig, ServiceError, ServiceResult, SubmitOutcome,
        SubmitRequest,
    };
    pub use govform_store::{SubmissionFilter, SubmissionStatus};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
