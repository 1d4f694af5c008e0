//! Form template types
//!
//! A [`FormTemplate`] describes one government form: who issues it, what it is
//! for, the ordered questions it asks and the documents the filer must have.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text
    Text,
    /// Calendar date
    Date,
    /// Numeric amount
    Number,
    /// Yes/no
    Boolean,
    /// One of a fixed set of options
    Select,
    /// Any number of options
    Multiselect,
    /// Social Security Number
    Ssn,
    /// Email address
    Email,
    /// US phone number
    Phone,
}

impl FieldType {
    /// Wire name of the type tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Ssn => "ssn",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single question on a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within its template
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Type tag
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value must be supplied before completing
    #[serde(default)]
    pub required: bool,
    /// Allowed options for select fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSpec {
    /// Create an optional field
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            options: None,
        }
    }

    /// Mark the field as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach allowed options
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// Static description of a government form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    /// Display name
    pub name: String,
    /// Issuing agency
    pub agency: String,
    /// What the form is for
    pub purpose: String,
    /// Ordered questions
    pub fields: Vec<FieldSpec>,
    /// Documents the filer needs at hand
    pub required_docs: Vec<String>,
}

impl FormTemplate {
    /// Create a template with no fields
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        agency: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            agency: agency.into(),
            purpose: purpose.into(),
            fields: Vec::new(),
            required_docs: Vec::new(),
        }
    }

    /// Append a field
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a required document
    #[must_use]
    pub fn with_required_doc(mut self, doc: impl Into<String>) -> Self {
        self.required_docs.push(doc.into());
        self
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate over required fields
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Summary view of a template, without its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    /// Form identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Issuing agency
    pub agency: String,
    /// What the form is for
    pub purpose: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_spec_serializes_type_tag() {
        let field = FieldSpec::new("ssn", "Social Security Number", FieldType::Ssn).required();
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({"name": "ssn", "label": "Social Security Number", "type": "ssn", "required": true})
        );
    }

    #[test]
    fn field_spec_required_defaults_false() {
        let field: FieldSpec =
            serde_json::from_value(json!({"name": "x", "label": "X", "type": "boolean"})).unwrap();
        assert!(!field.required);
        assert!(field.options.is_none());
    }

    #[test]
    fn template_uses_camel_case_docs() {
        let template = FormTemplate::new("Test", "IRS", "testing").with_required_doc("ID");
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["requiredDocs"], json!(["ID"]));
    }

    #[test]
    fn template_field_lookup() {
        let template = FormTemplate::new("Test", "IRS", "testing")
            .with_field(FieldSpec::new("a", "A", FieldType::Text).required())
            .with_field(FieldSpec::new("b", "B", FieldType::Number));

        assert_eq!(template.field("b").map(|f| f.field_type), Some(FieldType::Number));
        assert!(template.field("c").is_none());
        assert_eq!(template.required_fields().count(), 1);
    }

    #[test]
    fn field_type_display() {
        assert_eq!(FieldType::Multiselect.to_string(), "multiselect");
    }
}
