//! Lenient decoding of model output
//!
//! Models are asked for JSON but answer in free text. The decoder takes the
//! span from the first `{` to the last `}` and tries to parse it; anything
//! else is a [`Decoded::Fallback`], never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// First `{` through last `}`, across lines
static OBJECT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("Invalid object span regex"));

/// Result of a lenient decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// An object was found and parsed
    Parsed(T),
    /// No object, or the object did not parse
    Fallback,
}

impl<T> Decoded<T> {
    /// Check if an object was parsed
    #[inline]
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Parsed value, or the result of `fallback`
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Parsed(value) => value,
            Self::Fallback => fallback(),
        }
    }

    /// Convert to `Option`
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Fallback => None,
        }
    }
}

/// Locate the JSON object span in free text
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    OBJECT_SPAN.find(text).map(|m| m.as_str())
}

/// Decode the JSON object embedded in `text`
pub fn decode_lenient<T: DeserializeOwned>(text: &str) -> Decoded<T> {
    let Some(span) = extract_json_object(text) else {
        tracing::debug!("No JSON object in model output");
        return Decoded::Fallback;
    };

    match serde_json::from_str(span) {
        Ok(value) => Decoded::Parsed(value),
        Err(e) => {
            tracing::debug!("Model output did not parse: {}", e);
            Decoded::Fallback
        }
    }
}

/// Decode the embedded object as untyped JSON
///
/// Only text with no parseable object falls back; the shape of the keys is
/// left to the caller.
pub fn decode_object(text: &str) -> Decoded<Map<String, Value>> {
    decode_lenient(text)
}
