//! Form template registry
//!
//! Provides [`FormRegistry`] for looking up form templates by identifier.

use crate::builtin;
use crate::template::{FormSummary, FormTemplate};
use indexmap::IndexMap;

/// Ordered registry of form templates keyed by form identifier
///
/// Listing order is registration order. Templates are immutable once
/// registered; re-registering an identifier replaces the template in place.
#[derive(Debug, Default, Clone)]
pub struct FormRegistry {
    templates: IndexMap<String, FormTemplate>,
}

impl FormRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Create registry with the built-in W-4, I-9 and SS-5 templates
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (id, template) in builtin::templates() {
            registry.register(id, template);
        }
        registry
    }

    /// Register a template under `id`
    pub fn register(&mut self, id: impl Into<String>, template: FormTemplate) {
        self.templates.insert(id.into(), template);
    }

    /// Get a template by identifier
    ///
    /// Unknown identifiers yield `None`.
    #[inline]
    #[must_use]
    pub fn get_template(&self, id: &str) -> Option<&FormTemplate> {
        self.templates.get(id)
    }

    /// Summaries of every registered template, in registration order
    #[must_use]
    pub fn list_templates(&self) -> Vec<FormSummary> {
        self.templates
            .iter()
            .map(|(id, t)| FormSummary {
                id: id.clone(),
                name: t.name.clone(),
                agency: t.agency.clone(),
                purpose: t.purpose.clone(),
            })
            .collect()
    }

    /// Check if a template exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Registered identifiers, in registration order
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Get number of registered templates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
