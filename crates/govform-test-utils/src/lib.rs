//! Testing utilities for govform workspace
//!
//! Shared fixtures and service builders for integration tests.

#![allow(missing_docs)]

use govform_assist::{AssistGateway, MockBackend};
use govform_core::FormService;
use govform_forms::FormRegistry;
use govform_store::{MemoryBackend, ProfileStore, SubmissionStore};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Service over in-memory documents, with handles to inspect them
pub struct TestService {
    pub service: FormService,
    pub submissions: Arc<MemoryBackend>,
    pub profiles: Arc<MemoryBackend>,
}

pub fn memory_service() -> TestService {
    let submissions = Arc::new(MemoryBackend::new());
    let profiles = Arc::new(MemoryBackend::new());
    let service = FormService::new(
        FormRegistry::with_defaults(),
        SubmissionStore::new(submissions.clone()),
        ProfileStore::new(profiles.clone()),
    );
    TestService {
        service,
        submissions,
        profiles,
    }
}

/// In-memory service whose AI assist always answers `reply`
pub fn memory_service_with_ai(reply: &str) -> (TestService, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::default().with_response(reply));
    let TestService {
        service,
        submissions,
        profiles,
    } = memory_service();
    let service = service.with_assist(AssistGateway::new(backend.clone()));
    (
        TestService {
            service,
            submissions,
            profiles,
        },
        backend,
    )
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

/// W-4 answers that pass every field rule
pub fn complete_w4_data() -> Map<String, Value> {
    object(json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "ssn": "123-45-6789",
        "address": "12 Elm St, Springfield",
        "filingStatus": "Single or Married filing separately",
        "multipleJobs": false,
        "extraWithholding": 0,
    }))
}

/// W-4 answers missing a name and carrying a malformed SSN
pub fn incomplete_w4_data() -> Map<String, Value> {
    let mut data = complete_w4_data();
    data.remove("lastName");
    data.insert("ssn".to_string(), json!("12-345"));
    data
}

pub const AI_PASS: &str = r#"{"isValid": true, "errors": [], "warnings": [], "suggestions": []}"#;

pub const AI_FAIL: &str = r#"Here is my review:
{"isValid": false, "errors": [{"field": "address", "issue": "Missing ZIP code", "fix": "Add a ZIP code"}], "warnings": [{"field": "ssn", "warning": "Double-check the number"}]}"#;
