//! Runtime configuration
//!
//! Built in code through `with_*` methods or read from the environment:
//! - `GOVFORM_DATA_DIR`: directory holding the JSON documents (default `data`)
//! - `OPENAI_API_KEY`: enables AI assistance when set and non-empty
//! - `OPENAI_BASE_URL`: OpenAI-compatible endpoint (default hosted API)

use govform_assist::AssistModels;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Data directory environment variable
pub const DATA_DIR_VAR: &str = "GOVFORM_DATA_DIR";
/// API key environment variable
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Endpoint environment variable
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Profiles document file name
pub const PROFILES_FILE: &str = "profiles.json";
/// Submissions document file name
pub const SUBMISSIONS_FILE: &str = "submissions.json";

/// govform configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovformConfig {
    /// Directory holding `profiles.json` and `submissions.json`
    pub data_dir: PathBuf,
    /// AI assistance; disabled when `None`
    pub assist: Option<AssistConfig>,
}

impl GovformConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            let mut assist = AssistConfig::new(key);
            if let Some(url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
                assist.base_url = url;
            }
            config.assist = Some(assist);
        }

        config
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With AI assistance
    #[inline]
    #[must_use]
    pub fn with_assist(mut self, assist: AssistConfig) -> Self {
        self.assist = Some(assist);
        self
    }

    /// Whether AI assistance is configured
    #[inline]
    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.assist.is_some()
    }

    /// Path of the profiles document
    #[must_use]
    pub fn profiles_path(&self) -> PathBuf {
        self.data_dir.join(PROFILES_FILE)
    }

    /// Path of the submissions document
    #[must_use]
    pub fn submissions_path(&self) -> PathBuf {
        self.data_dir.join(SUBMISSIONS_FILE)
    }

    /// Data directory
    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for GovformConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            assist: None,
        }
    }
}

/// Connection to the chat completion service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Bearer credential
    pub api_key: String,
    /// OpenAI-compatible base URL
    pub base_url: String,
    /// Model per assist call
    #[serde(default)]
    pub models: AssistModels,
}

impl AssistConfig {
    /// Hosted OpenAI API with the default models
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: govform_assist::backend::OPENAI_BASE_URL.to_string(),
            models: AssistModels::default(),
        }
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// With models
    #[inline]
    #[must_use]
    pub fn with_models(mut self, models: AssistModels) -> Self {
        self.models = models;
        self
    }
}

impl fmt::Debug for AssistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .finish()
    }
}
