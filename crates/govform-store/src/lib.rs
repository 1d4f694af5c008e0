//! govform Store
//!
//! Flat JSON document persistence for form submissions and auto-fill profiles.
//!
//! Each store owns exactly one JSON document, reached through an injected
//! [`DocumentBackend`]. Every operation loads the whole document, mutates it
//! in memory and writes the whole document back. A missing or unreadable
//! document reads as empty.
//!
//! # Example
//!
//! ```rust
//! use govform_store::{MemoryBackend, NewSubmission, SubmissionFilter, SubmissionStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), govform_store::StoreError> {
//! let store = SubmissionStore::new(Arc::new(MemoryBackend::new()));
//! let saved = store.save(NewSubmission::draft("W-4", Default::default())).await?;
//!
//! let all = store.list(&SubmissionFilter::new()).await;
//! assert_eq!(all[0].id, saved.id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod profiles;
pub mod submissions;

// Re-exports
pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use error::{StoreError, StoreResult};
pub use profiles::{ProfileStore, DEFAULT_USER, UPDATED_AT_KEY};
pub use submissions::{
    NewSubmission, Submission, SubmissionFilter, SubmissionStatus, SubmissionStore,
    UnknownStatus,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for store operations
    pub use crate::{
        DocumentBackend, FileBackend, MemoryBackend, NewSubmission, ProfileStore, StoreError,
        Submission, SubmissionFilter, SubmissionStatus, SubmissionStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
