//! govform Forms
//!
//! Static government form templates and per-field validation rules.
//!
//! # Overview
//!
//! The forms crate provides:
//! - **FormTemplate**: a form's name, issuing agency, ordered fields and required documents
//! - **FormRegistry**: ordered lookup of templates by form identifier
//! - **validate**: pure field validation (required check + ssn/email/phone patterns)
//!
//! # Example
//!
//! ```rust
//! use govform_forms::{validate, FormRegistry, Verdict};
//! use serde_json::json;
//!
//! let registry = FormRegistry::with_defaults();
//! let w4 = registry.get_template("W-4").unwrap();
//! let ssn = w4.field("ssn").unwrap();
//!
//! assert_eq!(validate(ssn, Some(&json!("123-45-6789"))), Verdict::Valid);
//! assert!(!validate(ssn, None).is_valid());
//! ```

#![warn(missing_docs)]

mod builtin;
pub mod registry;
pub mod template;
pub mod validation;

// Re-exports
pub use registry::FormRegistry;
pub use template::{FieldSpec, FieldType, FormSummary, FormTemplate};
pub use validation::{validate, validate_all, FieldError, FieldIssue, Verdict};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for form operations
    pub use crate::{
        validate, validate_all, FieldError, FieldIssue, FieldSpec, FieldType, FormRegistry,
        FormSummary, FormTemplate, Verdict,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
