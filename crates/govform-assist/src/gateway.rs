//! Assist gateway
//!
//! Builds the prompts for each assist call, sends one completion request and
//! decodes the reply leniently.

use crate::backend::{CompletionRequest, LlmBackend, LlmError};
use crate::lenient::decode_object;
use crate::types::{AiValidation, FormAnalysis};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

const ANALYSIS_PROMPT: &str = r#"You are an expert in government forms and documentation. Analyze form requirements and provide guidance.

Return JSON:
{
  "formName": "Official form name",
  "purpose": "What this form is for",
  "eligibility": ["Who can/should file this"],
  "requiredFields": [
    {"field": "Field name", "type": "text/date/number/selection", "required": true, "help": "Guidance"}
  ],
  "requiredDocuments": ["Document 1", "Document 2"],
  "commonMistakes": ["Mistake to avoid"],
  "deadline": "If applicable",
  "estimatedTime": "15-30 minutes",
  "tips": ["Helpful tip"]
}"#;

const VALIDATION_PROMPT: &str = r#"Validate form data and identify issues. Return JSON:
{
  "isValid": true/false,
  "errors": [{"field": "Field name", "issue": "What's wrong", "fix": "How to fix"}],
  "warnings": [{"field": "Field", "warning": "Potential issue"}],
  "suggestions": ["Improvement suggestions"]
}"#;

const SUGGESTION_PROMPT: &str =
    "Based on the user profile and context, suggest appropriate values for government form fields.";

/// Model used for each assist call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistModels {
    /// Unknown-form analysis
    pub analysis: String,
    /// Submission review
    pub validation: String,
    /// Field value suggestions
    pub suggestion: String,
}

impl Default for AssistModels {
    fn default() -> Self {
        Self {
            analysis: "gpt-4o".to_string(),
            validation: "gpt-4o-mini".to_string(),
            suggestion: "gpt-4o-mini".to_string(),
        }
    }
}

/// Entry point for all assist calls
#[derive(Clone)]
pub struct AssistGateway {
    backend: Arc<dyn LlmBackend>,
    models: AssistModels,
}

impl fmt::Debug for AssistGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistGateway")
            .field("backend", &self.backend.id())
            .field("models", &self.models)
            .finish()
    }
}

impl AssistGateway {
    /// Create gateway over `backend` with the default models
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend,
            models: AssistModels::default(),
        }
    }

    /// With model choices
    #[inline]
    #[must_use]
    pub fn with_models(mut self, models: AssistModels) -> Self {
        self.models = models;
        self
    }

    /// Models in use
    #[inline]
    #[must_use]
    pub fn models(&self) -> &AssistModels {
        &self.models
    }

    /// Ask the model to describe a form that has no built-in template
    ///
    /// A reply with no parseable object becomes [`FormAnalysis::fallback`]
    /// carrying the raw reply as its only tip.
    pub async fn analyze_unknown_form(
        &self,
        name: &str,
        description: &str,
    ) -> Result<FormAnalysis, LlmError> {
        tracing::info!(form = name, "Requesting analysis of unknown form");

        let request = CompletionRequest::user(format!(
            "Analyze this government form:\nName: {name}\nDescription: {description}"
        ))
        .with_system(ANALYSIS_PROMPT)
        .with_model(&self.models.analysis)
        .with_max_tokens(1500)
        .with_temperature(0.3);

        let content = self.backend.complete(request).await?.content;
        Ok(match decode_object(&content).into_option() {
            Some(reply) => FormAnalysis::from_reply(&reply),
            None => FormAnalysis::fallback(name, content),
        })
    }

    /// Ask the model to review a submission's answers
    ///
    /// A reply with no parseable object is treated as a pass. Once an object
    /// is found, only `"isValid": true` passes.
    pub async fn validate_submission(
        &self,
        form_type: &str,
        data: &Map<String, Value>,
    ) -> Result<AiValidation, LlmError> {
        tracing::info!(form_type, fields = data.len(), "Requesting AI validation");

        let pretty = format!("{:#}", Value::Object(data.clone()));
        let request = CompletionRequest::user(format!(
            "Form type: {form_type}\nData to validate:\n{pretty}"
        ))
        .with_system(VALIDATION_PROMPT)
        .with_model(&self.models.validation)
        .with_max_tokens(800);

        let content = self.backend.complete(request).await?.content;
        let review = decode_object(&content)
            .into_option()
            .map_or_else(AiValidation::assume_valid, |reply| AiValidation::from_reply(&reply));
        tracing::debug!(is_valid = review.is_valid, errors = review.errors.len(), "AI validation done");
        Ok(review)
    }

    /// Ask the model for a value for one field, given the user's profile
    ///
    /// Returns the reply text as-is.
    pub async fn suggest_field_value(
        &self,
        field_name: &str,
        context: &str,
        profile: &Map<String, Value>,
    ) -> Result<String, LlmError> {
        let profile_json = Value::Object(profile.clone());
        let request = CompletionRequest::user(format!(
            "Field: {field_name}\nContext: {context}\nUser profile: {profile_json}"
        ))
        .with_system(SUGGESTION_PROMPT)
        .with_model(&self.models.suggestion)
        .with_max_tokens(200);

        Ok(self.backend.complete(request).await?.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::types::AiIssue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn gateway(reply: &str) -> (Arc<MockBackend>, AssistGateway) {
        let backend = Arc::new(MockBackend::default().with_response(reply));
        (backend.clone(), AssistGateway::new(backend))
    }

    #[tokio::test]
    async fn analysis_parses_embedded_object() {
        let (backend, gateway) = gateway(
            "Sure!\n{\"formName\": \"DS-11\", \"purpose\": \"Passport\", \"tips\": [\"Bring photos\"]}",
        );

        let analysis = gateway.analyze_unknown_form("DS-11", "").await.unwrap();
        assert_eq!(analysis.purpose.as_deref(), Some("Passport"));
        assert_eq!(analysis.tips, vec!["Bring photos".to_string()]);

        let request = &backend.requests()[0];
        assert_eq!(request.model.as_deref(), Some("gpt-4o"));
        assert_eq!(request.max_tokens, Some(1500));
        assert_eq!(request.temperature, Some(0.3));
        assert!(request.messages[0].content.contains("Name: DS-11"));
    }

    #[tokio::test]
    async fn analysis_falls_back_to_raw_text() {
        let (_, gateway) = gateway("I am not sure what that form is.");
        let analysis = gateway.analyze_unknown_form("XYZ-1", "mystery").await.unwrap();
        assert_eq!(
            analysis,
            FormAnalysis::fallback("XYZ-1", "I am not sure what that form is.")
        );
    }

    #[tokio::test]
    async fn validation_reports_issues() {
        let (backend, gateway) = gateway(
            r#"{"isValid": false, "errors": [{"field": "dob", "issue": "In the future", "fix": "Check year"}], "warnings": []}"#,
        );
        let data = json!({"dob": "2999-01-01"});

        let review = gateway
            .validate_submission("I-9", data.as_object().unwrap())
            .await
            .unwrap();

        assert!(!review.is_valid);
        assert_eq!(
            review.errors,
            vec![AiIssue {
                field: "dob".to_string(),
                issue: "In the future".to_string(),
                fix: Some("Check year".to_string()),
            }]
        );

        let request = &backend.requests()[0];
        assert_eq!(request.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(request.max_tokens, Some(800));
        assert!(request.messages[0].content.contains("\"dob\": \"2999-01-01\""));
    }

    #[tokio::test]
    async fn validation_rejection_with_plain_text_errors() {
        let (_, gateway) = gateway(
            r#"{"isValid": false, "errors": ["SSN belongs to a deceased person"], "warnings": []}"#,
        );
        let review = gateway.validate_submission("W-4", &Map::new()).await.unwrap();

        assert!(!review.is_valid);
        assert_eq!(review.errors[0].issue, "SSN belongs to a deceased person");
    }

    #[tokio::test]
    async fn analysis_keeps_parsed_keys_despite_mistyped_one() {
        let (_, gateway) = gateway(r#"{"formName": "DS-11", "estimatedTime": 30}"#);
        let analysis = gateway.analyze_unknown_form("DS-11", "").await.unwrap();

        assert_eq!(analysis.form_name.as_deref(), Some("DS-11"));
        assert_eq!(analysis.estimated_time.as_deref(), Some("30"));
        assert!(analysis.tips.is_empty());
    }

    #[tokio::test]
    async fn validation_undecodable_assumes_valid() {
        let (_, gateway) = gateway("Looks fine to me.");
        let review = gateway.validate_submission("W-4", &Map::new()).await.unwrap();
        assert_eq!(review, AiValidation::assume_valid());
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let backend = Arc::new(MockBackend::default().with_available(false));
        let gateway = AssistGateway::new(backend);

        let result = gateway.validate_submission("W-4", &Map::new()).await;
        assert!(matches!(result, Err(LlmError::Unavailable(_))));
    }

    #[tokio::test]
    async fn suggestion_returns_raw_text() {
        let (backend, gateway) = gateway("Springfield");
        let profile = json!({"city": "Springfield"});

        let suggestion = gateway
            .suggest_field_value("placeOfBirth", "SS-5", profile.as_object().unwrap())
            .await
            .unwrap();

        assert_eq!(suggestion, "Springfield");
        let request = &backend.requests()[0];
        assert_eq!(request.max_tokens, Some(200));
        assert!(request.messages[0]
            .content
            .contains("User profile: {\"city\":\"Springfield\"}"));
    }

    #[test]
    fn custom_models() {
        let backend = Arc::new(MockBackend::default());
        let gateway = AssistGateway::new(backend).with_models(AssistModels {
            analysis: "a".to_string(),
            validation: "b".to_string(),
            suggestion: "c".to_string(),
        });
        assert_eq!(gateway.models().validation, "b");
    }
}
