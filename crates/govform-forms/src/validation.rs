//! Field validation
//!
//! [`validate`] maps a field descriptor and a candidate value to a verdict.
//! Rules apply in order:
//! 1. required fields must carry a non-empty value
//! 2. ssn, email and phone values must match their pattern
//! 3. everything else passes

use crate::template::{FieldSpec, FieldType, FormTemplate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Social Security Number: `XXX-XX-XXXX`, dashes optional
static SSN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-?[0-9]{2}-?[0-9]{4}$").expect("Invalid SSN regex"));

/// Email: `local@domain.tld`
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Phone: `(###) ###-####` with flexible separators
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$").expect("Invalid phone regex")
});

/// Why a field value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Required field has no value
    #[error("This field is required")]
    Required,

    /// Value is not a Social Security Number
    #[error("Invalid SSN format (XXX-XX-XXXX)")]
    InvalidSsn,

    /// Value is not an email address
    #[error("Invalid email format")]
    InvalidEmail,

    /// Value is not a phone number
    #[error("Invalid phone format")]
    InvalidPhone,
}

/// Outcome of validating one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Value accepted
    Valid,
    /// Value rejected
    Invalid(FieldError),
}

impl Verdict {
    /// Check if the value was accepted
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Rejection reason, if any
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<FieldError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(*e),
        }
    }
}

/// One failing field, as reported back to the filer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field name
    pub field: String,
    /// Human-readable reason
    pub error: String,
}

impl FieldIssue {
    /// Create issue for a field
    #[must_use]
    pub fn new(field: impl Into<String>, error: FieldError) -> Self {
        Self {
            field: field.into(),
            error: error.to_string(),
        }
    }
}

/// Validate a candidate value against a field descriptor
///
/// `None` means the filer supplied nothing for the field. Pure function: safe
/// to call any number of times in any order.
#[must_use]
pub fn validate(field: &FieldSpec, value: Option<&Value>) -> Verdict {
    let present = value.filter(|v| !is_empty(v));

    let Some(value) = present else {
        return if field.required {
            Verdict::Invalid(FieldError::Required)
        } else {
            Verdict::Valid
        };
    };

    let (pattern, error) = match field.field_type {
        FieldType::Ssn => (&*SSN, FieldError::InvalidSsn),
        FieldType::Email => (&*EMAIL, FieldError::InvalidEmail),
        FieldType::Phone => (&*PHONE, FieldError::InvalidPhone),
        _ => return Verdict::Valid,
    };

    match pattern_text(value) {
        Some(text) if pattern.is_match(&text) => Verdict::Valid,
        _ => Verdict::Invalid(error),
    }
}

/// Validate every field of `template` against `data`
///
/// Returns one issue per failing field, in template order. Keys in `data`
/// that the template does not declare are ignored.
#[must_use]
pub fn validate_all(template: &FormTemplate, data: &Map<String, Value>) -> Vec<FieldIssue> {
    template
        .fields
        .iter()
        .filter_map(|field| {
            validate(field, data.get(&field.name))
                .error()
                .map(|e| FieldIssue::new(&field.name, e))
        })
        .collect()
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn pattern_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FormRegistry;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn field(field_type: FieldType) -> FieldSpec {
        FieldSpec::new("f", "F", field_type)
    }

    #[test]
    fn ssn_accepts_dashed_and_bare() {
        let ssn = field(FieldType::Ssn);
        assert!(validate(&ssn, Some(&json!("123-45-6789"))).is_valid());
        assert!(validate(&ssn, Some(&json!("123456789"))).is_valid());
        assert!(validate(&ssn, Some(&json!(123_456_789))).is_valid());
    }

    #[test]
    fn ssn_rejects_short() {
        let ssn = field(FieldType::Ssn);
        assert_eq!(
            validate(&ssn, Some(&json!("12345678"))),
            Verdict::Invalid(FieldError::InvalidSsn)
        );
        assert_eq!(
            validate(&ssn, Some(&json!("123-45-67890"))),
            Verdict::Invalid(FieldError::InvalidSsn)
        );
    }

    #[test]
    fn digit_patterns_are_ascii_only() {
        let ssn = field(FieldType::Ssn);
        assert_eq!(
            validate(&ssn, Some(&json!("١٢٣-٤٥-٦٧٨٩"))),
            Verdict::Invalid(FieldError::InvalidSsn)
        );
        assert!(!validate(&ssn, Some(&json!("１２３-４５-６７８９"))).is_valid());

        let phone = field(FieldType::Phone);
        assert_eq!(
            validate(&phone, Some(&json!("٥٥٥-١٢٣-٤٥٦٧"))),
            Verdict::Invalid(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn email_shape() {
        let email = field(FieldType::Email);
        assert!(validate(&email, Some(&json!("a@b.com"))).is_valid());
        assert_eq!(
            validate(&email, Some(&json!("not-an-email"))),
            Verdict::Invalid(FieldError::InvalidEmail)
        );
        assert!(!validate(&email, Some(&json!("a b@c.com"))).is_valid());
        assert!(!validate(&email, Some(&json!("a@bcom"))).is_valid());
    }

    #[test]
    fn phone_flexible_separators() {
        let phone = field(FieldType::Phone);
        for ok in ["(555) 123-4567", "555-123-4567", "555.123.4567", "5551234567"] {
            assert!(validate(&phone, Some(&json!(ok))).is_valid(), "{ok}");
        }
        assert_eq!(
            validate(&phone, Some(&json!("555-1234"))),
            Verdict::Invalid(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn optional_empty_is_valid() {
        let ssn = field(FieldType::Ssn);
        assert!(validate(&ssn, None).is_valid());
        assert!(validate(&ssn, Some(&json!(""))).is_valid());
        assert!(validate(&ssn, Some(&Value::Null)).is_valid());
    }

    #[test]
    fn required_false_and_zero_are_provided() {
        let flag = field(FieldType::Boolean).required();
        assert!(validate(&flag, Some(&json!(false))).is_valid());
        let amount = field(FieldType::Number).required();
        assert!(validate(&amount, Some(&json!(0))).is_valid());
        let docs = field(FieldType::Multiselect).required();
        assert_eq!(
            validate(&docs, Some(&json!([]))),
            Verdict::Invalid(FieldError::Required)
        );
    }

    #[test]
    fn other_types_pass_through() {
        let date = field(FieldType::Date).required();
        assert!(validate(&date, Some(&json!("not a date"))).is_valid());
        let select = field(FieldType::Select).with_options(["A"]);
        assert!(validate(&select, Some(&json!("B"))).is_valid());
    }

    #[test]
    fn non_string_fails_pattern() {
        let email = field(FieldType::Email);
        assert!(!validate(&email, Some(&json!(true))).is_valid());
    }

    #[test]
    fn required_message() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        let issue = FieldIssue::new("ssn", FieldError::Required);
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({"field": "ssn", "error": "This field is required"})
        );
    }

    #[test]
    fn validate_all_reports_each_failing_field() {
        let registry = FormRegistry::with_defaults();
        let w4 = registry.get_template("W-4").unwrap();
        let data = json!({
            "firstName": "Ada",
            "ssn": "12345",
            "filingStatus": "Head of household",
            "unknownKey": "ignored",
        });
        let issues = validate_all(w4, data.as_object().unwrap());
        assert_eq!(
            issues,
            vec![
                FieldIssue::new("lastName", FieldError::Required),
                FieldIssue::new("ssn", FieldError::InvalidSsn),
                FieldIssue::new("address", FieldError::Required),
            ]
        );
    }

    #[test]
    fn validate_all_clean_form() {
        let registry = FormRegistry::with_defaults();
        let w4 = registry.get_template("W-4").unwrap();
        let data = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "ssn": "123-45-6789",
            "address": "1 Main St",
            "filingStatus": "Single or Married filing separately",
        });
        assert!(validate_all(w4, data.as_object().unwrap()).is_empty());
    }

    fn any_field_type() -> impl Strategy<Value = FieldType> {
        prop_oneof![
            Just(FieldType::Text),
            Just(FieldType::Date),
            Just(FieldType::Number),
            Just(FieldType::Boolean),
            Just(FieldType::Select),
            Just(FieldType::Multiselect),
            Just(FieldType::Ssn),
            Just(FieldType::Email),
            Just(FieldType::Phone),
        ]
    }

    fn empty_value() -> impl Strategy<Value = Option<Value>> {
        prop_oneof![
            Just(None),
            Just(Some(Value::Null)),
            Just(Some(json!(""))),
            Just(Some(json!([]))),
            Just(Some(json!({}))),
        ]
    }

    proptest! {
        #[test]
        fn prop_required_empty_always_invalid(
            field_type in any_field_type(),
            value in empty_value(),
        ) {
            let spec = field(field_type).required();
            prop_assert_eq!(
                validate(&spec, value.as_ref()),
                Verdict::Invalid(FieldError::Required)
            );
        }

        #[test]
        fn prop_digits_ssn_valid(n in 0u32..1_000_000_000) {
            let text = format!("{n:09}");
            let dashed = format!("{}-{}-{}", &text[..3], &text[3..5], &text[5..]);
            let ssn = field(FieldType::Ssn).required();
            prop_assert!(validate(&ssn, Some(&json!(text))).is_valid());
            prop_assert!(validate(&ssn, Some(&json!(dashed))).is_valid());
        }
    }
}
