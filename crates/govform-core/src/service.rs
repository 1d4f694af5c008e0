//! Form service
//!
//! The request layer of govform:
//! - looks up form templates, falling back to AI analysis for unknown forms
//! - reads and merges the auto-fill profile
//! - lists, fetches and saves submissions, gating completion on validation

use crate::config::GovformConfig;
use crate::error::{ServiceError, ServiceResult};
use govform_assist::{AiIssue, AiWarning, AssistGateway, FormAnalysis, OpenAiBackend};
use govform_forms::{validate_all, FieldIssue, FormRegistry, FormSummary, FormTemplate};
use govform_store::{
    FileBackend, NewSubmission, ProfileStore, StoreError, Submission, SubmissionFilter,
    SubmissionStatus, SubmissionStore, DEFAULT_USER,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Message returned when completion is blocked by field errors
pub const FIELD_ERRORS_MESSAGE: &str = "Please fix validation errors before completing";
/// Message returned when completion is blocked by the AI review
pub const AI_REVIEW_MESSAGE: &str = "AI validation found issues";

/// Where a form description came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "form", rename_all = "lowercase")]
pub enum FormLookup {
    /// Built-in template
    Database(FormTemplate),
    /// Model-generated guidance for an unknown form
    Ai(FormAnalysis),
}

/// Create-or-update request for a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Existing submission to overwrite
    #[serde(default)]
    pub id: Option<String>,
    /// Form template identifier
    #[serde(default)]
    pub form_type: String,
    /// Answers keyed by field name
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    /// Requested status
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl SubmitRequest {
    /// Create a draft request
    #[must_use]
    pub fn new(form_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            form_type: form_type.into(),
            data: Some(data),
            ..Default::default()
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.status = status;
        self
    }

    /// Target an existing submission
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Why a completion was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Template fields failed validation
    FieldErrors(Vec<FieldIssue>),
    /// The AI review found problems
    AiReview {
        /// Blocking problems
        errors: Vec<AiIssue>,
        /// Non-blocking concerns
        warnings: Vec<AiWarning>,
    },
}

impl Rejection {
    /// Human-readable summary
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::FieldErrors(_) => FIELD_ERRORS_MESSAGE,
            Self::AiReview { .. } => AI_REVIEW_MESSAGE,
        }
    }
}

/// Result of [`FormService::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Persisted
    Saved(Submission),
    /// Refused; nothing was written
    Rejected(Rejection),
}

impl SubmitOutcome {
    /// Check if the submission was persisted
    #[inline]
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    /// Response body: `{success, submission}` or `{success, errors, warnings?, message}`
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Saved(submission) => json!({"success": true, "submission": submission}),
            Self::Rejected(rejection @ Rejection::FieldErrors(errors)) => json!({
                "success": false,
                "errors": errors,
                "message": rejection.message(),
            }),
            Self::Rejected(rejection @ Rejection::AiReview { errors, warnings }) => json!({
                "success": false,
                "errors": errors,
                "warnings": warnings,
                "message": rejection.message(),
            }),
        }
    }
}

/// The govform request layer
#[derive(Debug)]
pub struct FormService {
    registry: FormRegistry,
    submissions: SubmissionStore,
    profiles: ProfileStore,
    assist: Option<AssistGateway>,
}

impl FormService {
    /// Create service without AI assistance
    #[must_use]
    pub fn new(registry: FormRegistry, submissions: SubmissionStore, profiles: ProfileStore) -> Self {
        Self {
            registry,
            submissions,
            profiles,
            assist: None,
        }
    }

    /// Create service from configuration: file-backed stores, built-in
    /// templates, and AI assistance when a credential is configured
    pub fn from_config(config: &GovformConfig) -> ServiceResult<Self> {
        let submissions =
            SubmissionStore::new(Arc::new(FileBackend::new(config.submissions_path())));
        let profiles = ProfileStore::new(Arc::new(FileBackend::new(config.profiles_path())));
        let mut service = Self::new(FormRegistry::with_defaults(), submissions, profiles);

        if let Some(assist) = &config.assist {
            let backend = OpenAiBackend::new(
                assist.base_url.clone(),
                assist.models.validation.clone(),
                Some(assist.api_key.clone()),
            )
            .map_err(|e| ServiceError::Config(e.to_string()))?;
            let gateway = AssistGateway::new(Arc::new(backend)).with_models(assist.models.clone());
            service = service.with_assist(gateway);
        }

        tracing::info!(
            data_dir = %config.data_dir.display(),
            ai_enabled = service.ai_enabled(),
            "Form service ready"
        );
        Ok(service)
    }

    /// With AI assistance
    #[inline]
    #[must_use]
    pub fn with_assist(mut self, gateway: AssistGateway) -> Self {
        self.assist = Some(gateway);
        self
    }

    /// Whether AI assistance is available
    #[inline]
    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.assist.is_some()
    }

    /// Template registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    /// Summaries of the built-in forms
    #[must_use]
    pub fn list_forms(&self) -> Vec<FormSummary> {
        self.registry.list_templates()
    }

    /// Describe a form
    ///
    /// Built-in templates come from the registry. Unknown forms are analyzed
    /// by the model when AI is enabled; otherwise the result is `None`.
    pub async fn get_form(&self, form_type: &str) -> ServiceResult<Option<FormLookup>> {
        if let Some(template) = self.registry.get_template(form_type) {
            return Ok(Some(FormLookup::Database(template.clone())));
        }

        match &self.assist {
            Some(gateway) => {
                let analysis = gateway.analyze_unknown_form(form_type, "").await?;
                Ok(Some(FormLookup::Ai(analysis)))
            }
            None => {
                tracing::debug!(form_type, "Form not found and AI disabled");
                Ok(None)
            }
        }
    }

    /// The default user's profile
    pub async fn get_profile(&self) -> Map<String, Value> {
        self.profiles.get(DEFAULT_USER).await
    }

    /// Merge `partial` into the default user's profile
    pub async fn save_profile(&self, partial: Map<String, Value>) -> ServiceResult<Map<String, Value>> {
        Ok(self.profiles.save(DEFAULT_USER, partial).await?)
    }

    /// Stored submissions matching `filter`
    pub async fn list_submissions(&self, filter: &SubmissionFilter) -> Vec<Submission> {
        self.submissions.list(filter).await
    }

    /// A stored submission
    pub async fn get_submission(&self, id: &str) -> Option<Submission> {
        self.submissions.get_by_id(id).await
    }

    /// Create or update a submission
    ///
    /// # Workflow
    /// 1. Require a form type and data
    /// 2. Validate every template field (unknown form types skip this)
    /// 3. When completing, refuse on any field error
    /// 4. When completing with AI enabled, refuse if the review fails
    /// 5. Persist, recording field errors and the review
    pub async fn submit(&self, request: SubmitRequest) -> ServiceResult<SubmitOutcome> {
        let SubmitRequest {
            id,
            form_type,
            data,
            status,
        } = request;

        let data = match data {
            Some(data) if !form_type.trim().is_empty() => data,
            _ => {
                return Err(ServiceError::InvalidRequest(
                    "Form type and data required".to_string(),
                ))
            }
        };

        let errors = self
            .registry
            .get_template(&form_type)
            .map(|template| validate_all(template, &data))
            .unwrap_or_default();

        let completing = status == SubmissionStatus::Complete;

        if completing && !errors.is_empty() {
            tracing::info!(
                form_type = %form_type,
                failing = errors.len(),
                "Completion refused by field validation"
            );
            return Ok(SubmitOutcome::Rejected(Rejection::FieldErrors(errors)));
        }

        let mut ai_validation = None;
        if completing {
            if let Some(gateway) = &self.assist {
                let review = gateway.validate_submission(&form_type, &data).await?;
                if !review.is_valid {
                    tracing::info!(
                        form_type = %form_type,
                        issues = review.errors.len(),
                        "Completion refused by AI review"
                    );
                    return Ok(SubmitOutcome::Rejected(Rejection::AiReview {
                        errors: review.errors,
                        warnings: review.warnings,
                    }));
                }
                ai_validation = Some(serde_json::to_value(&review).map_err(StoreError::from)?);
            }
        }

        let mut submission = NewSubmission::draft(form_type, data)
            .with_status(status)
            .with_errors(errors);
        submission.id = id;
        submission.ai_validation = ai_validation;

        let saved = self.submissions.save(submission).await?;
        tracing::info!(id = %saved.id, status = %saved.status, "Submission saved");
        Ok(SubmitOutcome::Saved(saved))
    }

    /// Suggest a value for one field from the default user's profile
    ///
    /// Returns `None` when AI is disabled.
    pub async fn suggest_field_value(
        &self,
        form_type: &str,
        field_name: &str,
        context: &str,
    ) -> ServiceResult<Option<String>> {
        let Some(gateway) = &self.assist else {
            return Ok(None);
        };

        let profile = self.get_profile().await;
        let context = match self.registry.get_template(form_type) {
            Some(template) => format!("{} ({}). {context}", template.name, form_type),
            None => format!("{form_type}. {context}"),
        };

        let suggestion = gateway
            .suggest_field_value(field_name, context.trim(), &profile)
            .await?;
        Ok(Some(suggestion))
    }
}
