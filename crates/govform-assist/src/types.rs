//! Structured results of the assist calls
//!
//! Replies are mapped key by key with `from_reply`. A key of the wrong shape
//! is coerced to text or skipped; it never discards the rest of the reply.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys of [`FormAnalysis`] that are not collected into `extra`
const ANALYSIS_KEYS: [&str; 9] = [
    "formName",
    "purpose",
    "eligibility",
    "requiredFields",
    "requiredDocuments",
    "commonMistakes",
    "deadline",
    "estimatedTime",
    "tips",
];

/// Strings as-is, `null` as nothing, anything else as its JSON text
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Elements of a list; a lone value counts as a list of one
fn items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
        Some(other) => vec![other],
    }
}

fn texts(value: Option<&Value>) -> Vec<String> {
    items(value).into_iter().filter_map(text).collect()
}

fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// Guidance for a form with no built-in template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormAnalysis {
    /// Official form name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// What the form is for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Who can or should file it
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eligibility: Vec<String>,
    /// Fields the filer must supply
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_fields: Vec<AnalyzedField>,
    /// Documents to gather
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_documents: Vec<String>,
    /// Mistakes to avoid
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub common_mistakes: Vec<String>,
    /// Filing deadline, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Time to fill in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// Free-form tips
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
    /// Keys the model added beyond the requested shape
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormAnalysis {
    /// Minimal analysis echoing the form name, with the raw reply as a tip
    #[must_use]
    pub fn fallback(form_name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            form_name: Some(form_name.into()),
            tips: vec![raw.into()],
            ..Default::default()
        }
    }

    /// Map a decoded reply onto the analysis shape
    #[must_use]
    pub fn from_reply(reply: &Map<String, Value>) -> Self {
        Self {
            form_name: reply.get("formName").and_then(text),
            purpose: reply.get("purpose").and_then(text),
            eligibility: texts(reply.get("eligibility")),
            required_fields: items(reply.get("requiredFields"))
                .into_iter()
                .map(AnalyzedField::from_reply)
                .collect(),
            required_documents: texts(reply.get("requiredDocuments")),
            common_mistakes: texts(reply.get("commonMistakes")),
            deadline: reply.get("deadline").and_then(text),
            estimated_time: reply.get("estimatedTime").and_then(text),
            tips: texts(reply.get("tips")),
            extra: reply
                .iter()
                .filter(|(key, _)| !ANALYSIS_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}

/// One field described by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzedField {
    /// Field name
    pub field: String,
    /// Type hint (text/date/number/selection)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field is mandatory
    pub required: bool,
    /// Filing guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl AnalyzedField {
    /// Map one `requiredFields` item; a bare value becomes the field name
    #[must_use]
    pub fn from_reply(item: &Value) -> Self {
        match item {
            Value::Object(obj) => Self {
                field: obj.get("field").and_then(text).unwrap_or_default(),
                field_type: obj.get("type").and_then(text).unwrap_or_default(),
                required: is_true(obj.get("required")),
                help: obj.get("help").and_then(text),
            },
            other => Self {
                field: text(other).unwrap_or_default(),
                ..Default::default()
            },
        }
    }
}

/// Semantic review of a submission
///
/// Only a literal `"isValid": true` passes. A reply that omits the key or
/// gives any other value counts as not valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiValidation {
    /// Whether the submission may be completed
    pub is_valid: bool,
    /// Blocking problems
    pub errors: Vec<AiIssue>,
    /// Non-blocking concerns
    pub warnings: Vec<AiWarning>,
    /// Improvement suggestions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl AiValidation {
    /// Review used when the model's reply cannot be decoded
    #[must_use]
    pub fn assume_valid() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    /// Map a decoded reply onto the review shape
    #[must_use]
    pub fn from_reply(reply: &Map<String, Value>) -> Self {
        Self {
            is_valid: is_true(reply.get("isValid")),
            errors: items(reply.get("errors"))
                .into_iter()
                .map(AiIssue::from_reply)
                .collect(),
            warnings: items(reply.get("warnings"))
                .into_iter()
                .map(AiWarning::from_reply)
                .collect(),
            suggestions: texts(reply.get("suggestions")),
        }
    }
}

/// Blocking problem found by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiIssue {
    /// Field name
    pub field: String,
    /// What is wrong
    pub issue: String,
    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl AiIssue {
    /// Map one `errors` item; anything but an object becomes the issue text
    #[must_use]
    pub fn from_reply(item: &Value) -> Self {
        match item {
            Value::Object(obj) => Self {
                field: obj.get("field").and_then(text).unwrap_or_default(),
                issue: obj
                    .get("issue")
                    .and_then(text)
                    .unwrap_or_else(|| item.to_string()),
                fix: obj.get("fix").and_then(text),
            },
            other => Self {
                issue: text(other).unwrap_or_default(),
                ..Default::default()
            },
        }
    }
}

/// Non-blocking concern raised by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiWarning {
    /// Field name
    pub field: String,
    /// Potential issue
    pub warning: String,
}

impl AiWarning {
    /// Map one `warnings` item; anything but an object becomes the warning text
    #[must_use]
    pub fn from_reply(item: &Value) -> Self {
        match item {
            Value::Object(obj) => Self {
                field: obj.get("field").and_then(text).unwrap_or_default(),
                warning: obj
                    .get("warning")
                    .and_then(text)
                    .unwrap_or_else(|| item.to_string()),
            },
            other => Self {
                warning: text(other).unwrap_or_default(),
                ..Default::default()
            },
        }
    }
}
