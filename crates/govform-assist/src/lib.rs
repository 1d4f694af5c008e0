//! govform Assist
//!
//! Optional language-model help for the form workflow:
//! - guidance for forms that have no built-in template
//! - a semantic review of a submission before it is completed
//! - a suggested value for a single field
//!
//! Every call is a single request/response round trip to an
//! OpenAI-compatible chat completion endpoint. The model's free text is
//! decoded leniently: the first `{ ... }` span is parsed, and anything that
//! does not parse falls back to a fixed default. Transport failures are not
//! caught here; they reach the caller as [`LlmError`].
//!
//! # Example
//!
//! ```rust
//! use govform_assist::{AssistGateway, MockBackend};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), govform_assist::LlmError> {
//! let backend = Arc::new(MockBackend::new("mock").with_response(r#"{"isValid": true}"#));
//! let gateway = AssistGateway::new(backend);
//!
//! let review = gateway.validate_submission("W-4", &Default::default()).await?;
//! assert!(review.is_valid);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod gateway;
pub mod lenient;
pub mod types;

// Re-exports
pub use backend::{
    CompletionRequest, CompletionResponse, LlmBackend, LlmError, Message, MessageRole,
    MockBackend, OpenAiBackend,
};
pub use gateway::{AssistGateway, AssistModels};
pub use lenient::{decode_lenient, decode_object, extract_json_object, Decoded};
pub use types::{AiIssue, AiValidation, AiWarning, AnalyzedField, FormAnalysis};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
