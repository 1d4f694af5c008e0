//! Submission store
//!
//! Keeps every draft and completed submission in one `{submissions: [...]}`
//! document. New entries go to the front of the list; saving again under an
//! existing id replaces the entry where it stands.
//!
//! Entries are held as raw JSON. One that does not decode as a [`Submission`]
//! (a status other than `draft`/`complete`, a missing timestamp) is left out
//! of reads but written back untouched, so it is never lost on a save.

use crate::backend::DocumentBackend;
use crate::error::StoreResult;
use chrono::{DateTime, Utc};
use govform_forms::FieldIssue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use ulid::Ulid;

/// Lifecycle state of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Work in progress; field errors are recorded but do not block saving
    #[default]
    Draft,
    /// Finished; every field must validate before the submission is stored
    Complete,
}

impl SubmissionStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status string that is neither `draft` nor `complete`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown submission status: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for SubmissionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "complete" => Ok(Self::Complete),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Identifier, time-ordered
    pub id: String,
    /// Form template identifier
    pub form_type: String,
    /// Answers keyed by field name
    pub data: Map<String, Value>,
    /// Lifecycle state
    pub status: SubmissionStatus,
    /// Field validation problems recorded with a draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldIssue>>,
    /// Result of the AI validation pass, if one ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_validation: Option<Value>,
    /// First save
    pub created_at: DateTime<Utc>,
    /// Latest save
    pub updated_at: DateTime<Utc>,
}

/// Submission as handed to [`SubmissionStore::save`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    /// Existing id to overwrite; `None` creates a new entry
    #[serde(default)]
    pub id: Option<String>,
    /// Form template identifier
    pub form_type: String,
    /// Answers keyed by field name
    pub data: Map<String, Value>,
    /// Lifecycle state
    #[serde(default)]
    pub status: SubmissionStatus,
    /// Field validation problems
    #[serde(default)]
    pub errors: Option<Vec<FieldIssue>>,
    /// AI validation result
    #[serde(default)]
    pub ai_validation: Option<Value>,
}

impl NewSubmission {
    /// Create a draft
    #[must_use]
    pub fn draft(form_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            form_type: form_type.into(),
            data,
            ..Default::default()
        }
    }

    /// Target an existing id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.status = status;
        self
    }

    /// With recorded field errors; an empty list records nothing
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldIssue>) -> Self {
        self.errors = if errors.is_empty() { None } else { Some(errors) };
        self
    }

    /// With AI validation result
    #[inline]
    #[must_use]
    pub fn with_ai_validation(mut self, result: Value) -> Self {
        self.ai_validation = Some(result);
        self
    }

    fn into_entry(self, id: String, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Submission {
        Submission {
            id,
            form_type: self.form_type,
            data: self.data,
            status: self.status,
            errors: self.errors,
            ai_validation: self.ai_validation,
            created_at,
            updated_at: now,
        }
    }
}

/// Exact-match filter over stored submissions
///
/// Unset criteria match everything; set criteria combine as a conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    /// Required form type
    pub form_type: Option<String>,
    /// Required status
    pub status: Option<SubmissionStatus>,
}

impl SubmissionFilter {
    /// Match everything
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one form type
    #[inline]
    #[must_use]
    pub fn form_type(mut self, form_type: impl Into<String>) -> Self {
        self.form_type = Some(form_type.into());
        self
    }

    /// Restrict to one status
    #[inline]
    #[must_use]
    pub fn status(mut self, status: SubmissionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check a submission against the filter
    #[must_use]
    pub fn matches(&self, submission: &Submission) -> bool {
        self.form_type
            .as_deref()
            .map_or(true, |f| submission.form_type == f)
            && self.status.map_or(true, |s| submission.status == s)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SubmissionsDocument {
    #[serde(default)]
    submissions: Vec<Value>,
}

impl SubmissionsDocument {
    fn position(&self, id: &str) -> Option<usize> {
        self.submissions
            .iter()
            .position(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
    }

    /// Entries that decode, in document order
    fn decoded(self) -> impl Iterator<Item = Submission> {
        self.submissions.into_iter().filter_map(|entry| {
            serde_json::from_value::<Submission>(entry)
                .map_err(|e| tracing::warn!("Skipping unreadable submission entry: {}", e))
                .ok()
        })
    }
}

/// `createdAt` of a raw entry, if it carries a readable one
fn created_at(entry: &Value) -> Option<DateTime<Utc>> {
    let text = entry.get("createdAt")?.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Store of submissions backed by one JSON document
pub struct SubmissionStore {
    backend: Arc<dyn DocumentBackend>,
    // Serializes read-modify-write cycles through this instance
    lock: Mutex<()>,
}

impl fmt::Debug for SubmissionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionStore").finish_non_exhaustive()
    }
}

impl SubmissionStore {
    /// Create store over `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Save a submission
    ///
    /// Without an id a fresh id is assigned and the entry is prepended. With
    /// an id that is already stored, the entry is replaced in place and keeps
    /// its `created_at`. With an id that is not stored, the entry is prepended
    /// under that id.
    pub async fn save(&self, submission: NewSubmission) -> StoreResult<Submission> {
        let _guard = self.lock.lock().await;
        let mut document = self.load_document().await;
        let now = Utc::now();

        let (entry, index) = match submission.id.clone() {
            None => (submission.into_entry(Ulid::new().to_string(), now, now), None),
            Some(id) => match document.position(&id) {
                Some(index) => {
                    let created = created_at(&document.submissions[index]).unwrap_or(now);
                    (submission.into_entry(id, created, now), Some(index))
                }
                None => (submission.into_entry(id, now, now), None),
            },
        };

        let raw = serde_json::to_value(&entry)?;
        match index {
            Some(index) => document.submissions[index] = raw,
            None => document.submissions.insert(0, raw),
        }

        self.write_document(&document).await?;
        tracing::debug!(
            id = %entry.id,
            form_type = %entry.form_type,
            status = %entry.status,
            "Saved submission"
        );
        Ok(entry)
    }

    /// Stored submissions matching `filter`, most recently created first
    pub async fn list(&self, filter: &SubmissionFilter) -> Vec<Submission> {
        let _guard = self.lock.lock().await;
        self.load_document()
            .await
            .decoded()
            .filter(|s| filter.matches(s))
            .collect()
    }

    /// Get a submission by id
    pub async fn get_by_id(&self, id: &str) -> Option<Submission> {
        let _guard = self.lock.lock().await;
        self.load_document()
            .await
            .decoded()
            .find(|s| s.id == id)
    }

    async fn load_document(&self) -> SubmissionsDocument {
        match self.backend.load().await {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Submissions document unreadable, treating as empty: {}", e);
                SubmissionsDocument::default()
            }),
            Ok(None) => SubmissionsDocument::default(),
            Err(e) => {
                tracing::warn!("Failed to load submissions, treating as empty: {}", e);
                SubmissionsDocument::default()
            }
        }
    }

    async fn write_document(&self, document: &SubmissionsDocument) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(document)?;
        self.backend.store(text).await
    }
}
