//! Profile store
//!
//! Auto-fill data kept per user in one `{profiles: {userId: {...}}}`
//! document. Saves merge shallowly into what is already stored.

use crate::backend::DocumentBackend;
use crate::error::StoreResult;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The single user this system serves
pub const DEFAULT_USER: &str = "default";

/// Key stamped into every saved profile
pub const UPDATED_AT_KEY: &str = "updatedAt";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfilesDocument {
    #[serde(default)]
    profiles: BTreeMap<String, Map<String, Value>>,
}

/// Store of auto-fill profiles backed by one JSON document
pub struct ProfileStore {
    backend: Arc<dyn DocumentBackend>,
    lock: Mutex<()>,
}

impl fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileStore").finish_non_exhaustive()
    }
}

impl ProfileStore {
    /// Create store over `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Profile of `user_id`, or an empty mapping when none is stored
    pub async fn get(&self, user_id: &str) -> Map<String, Value> {
        let _guard = self.lock.lock().await;
        self.load_document()
            .await
            .profiles
            .remove(user_id)
            .unwrap_or_default()
    }

    /// Merge `partial` into the profile of `user_id`
    ///
    /// Keys in `partial` overwrite stored keys one level deep; other stored
    /// keys are kept. Returns the merged profile, stamped with `updatedAt`.
    pub async fn save(
        &self,
        user_id: &str,
        partial: Map<String, Value>,
    ) -> StoreResult<Map<String, Value>> {
        let _guard = self.lock.lock().await;
        let mut document = self.load_document().await;

        let profile = document.profiles.entry(user_id.to_string()).or_default();
        profile.extend(partial);
        profile.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        let merged = profile.clone();

        let text = serde_json::to_string_pretty(&document)?;
        self.backend.store(text).await?;
        tracing::debug!(user_id, keys = merged.len(), "Saved profile");
        Ok(merged)
    }

    async fn load_document(&self) -> ProfilesDocument {
        match self.backend.load().await {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Profiles document unreadable, treating as empty: {}", e);
                ProfilesDocument::default()
            }),
            Ok(None) => ProfilesDocument::default(),
            Err(e) => {
                tracing::warn!("Failed to load profiles, treating as empty: {}", e);
                ProfilesDocument::default()
            }
        }
    }
}
