//! Submission workflow through the service.

use govform_core::{FormLookup, Rejection, SubmitOutcome, SubmitRequest, FIELD_ERRORS_MESSAGE};
use govform_store::{SubmissionFilter, SubmissionStatus};
use govform_test_utils::{
    complete_w4_data, incomplete_w4_data, memory_service, memory_service_with_ai, object, AI_FAIL,
    AI_PASS,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn saved(outcome: SubmitOutcome) -> govform_store::Submission {
    match outcome {
        SubmitOutcome::Saved(submission) => submission,
        SubmitOutcome::Rejected(rejection) => panic!("unexpected rejection: {rejection:?}"),
    }
}

#[tokio::test]
async fn completing_with_failing_fields_writes_nothing() {
    let t = memory_service();

    let outcome = t
        .service
        .submit(
            SubmitRequest::new("W-4", incomplete_w4_data()).with_status(SubmissionStatus::Complete),
        )
        .await
        .unwrap();

    let body = outcome.to_json();
    assert_eq!(
        body,
        json!({
            "success": false,
            "errors": [
                {"field": "lastName", "error": "This field is required"},
                {"field": "ssn", "error": "Invalid SSN format (XXX-XX-XXXX)"},
            ],
            "message": FIELD_ERRORS_MESSAGE,
        })
    );
    assert_eq!(t.submissions.write_count(), 0);
    assert!(t.service.list_submissions(&SubmissionFilter::new()).await.is_empty());
}

#[tokio::test]
async fn draft_then_complete_keeps_id_and_created_at() {
    let t = memory_service();

    let draft = saved(
        t.service
            .submit(SubmitRequest::new("W-4", incomplete_w4_data()))
            .await
            .unwrap(),
    );
    assert_eq!(draft.errors.as_ref().map(Vec::len), Some(2));

    let complete = saved(
        t.service
            .submit(
                SubmitRequest::new("W-4", complete_w4_data())
                    .with_id(&draft.id)
                    .with_status(SubmissionStatus::Complete),
            )
            .await
            .unwrap(),
    );

    assert_eq!(complete.id, draft.id);
    assert_eq!(complete.created_at, draft.created_at);
    assert!(complete.updated_at >= draft.updated_at);
    assert!(complete.errors.is_none());

    let all = t.service.list_submissions(&SubmissionFilter::new()).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, SubmissionStatus::Complete);
    assert_eq!(t.submissions.write_count(), 2);
}

#[tokio::test]
async fn listing_filters_by_form_and_status() {
    let t = memory_service();
    t.service
        .submit(SubmitRequest::new("W-4", complete_w4_data()))
        .await
        .unwrap();
    t.service
        .submit(
            SubmitRequest::new("W-4", complete_w4_data()).with_status(SubmissionStatus::Complete),
        )
        .await
        .unwrap();
    t.service
        .submit(SubmitRequest::new("I-9", object(json!({}))))
        .await
        .unwrap();

    let w4_drafts = t
        .service
        .list_submissions(
            &SubmissionFilter::new()
                .form_type("W-4")
                .status(SubmissionStatus::Draft),
        )
        .await;
    assert_eq!(w4_drafts.len(), 1);

    let all = t.service.list_submissions(&SubmissionFilter::new()).await;
    assert_eq!(
        all.iter().map(|s| s.form_type.as_str()).collect::<Vec<_>>(),
        vec!["I-9", "W-4", "W-4"]
    );
    assert!(t.service.get_submission(&all[1].id).await.is_some());
    assert!(t.service.get_submission("missing").await.is_none());
}

#[tokio::test]
async fn ai_rejection_reports_errors_and_warnings() {
    let (t, backend) = memory_service_with_ai(AI_FAIL);

    let outcome = t
        .service
        .submit(
            SubmitRequest::new("W-4", complete_w4_data()).with_status(SubmissionStatus::Complete),
        )
        .await
        .unwrap();

    match &outcome {
        SubmitOutcome::Rejected(Rejection::AiReview { errors, warnings }) => {
            assert_eq!(errors[0].field, "address");
            assert_eq!(errors[0].fix.as_deref(), Some("Add a ZIP code"));
            assert_eq!(warnings[0].warning, "Double-check the number");
        }
        other => panic!("expected AI rejection, got {other:?}"),
    }
    assert_eq!(outcome.to_json()["message"], json!("AI validation found issues"));
    assert_eq!(backend.call_count(), 1);
    assert_eq!(t.submissions.write_count(), 0);
}

#[tokio::test]
async fn loosely_shaped_ai_rejection_still_blocks() {
    let (t, _) = memory_service_with_ai(
        r#"{"isValid": false, "errors": ["SSN belongs to a deceased person"], "suggestions": "none"}"#,
    );

    let outcome = t
        .service
        .submit(
            SubmitRequest::new("W-4", complete_w4_data()).with_status(SubmissionStatus::Complete),
        )
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Rejected(Rejection::AiReview { errors, .. }) => {
            assert_eq!(errors[0].issue, "SSN belongs to a deceased person");
        }
        other => panic!("expected AI rejection, got {other:?}"),
    }
    assert_eq!(t.submissions.write_count(), 0);
}

#[tokio::test]
async fn ai_pass_is_recorded_on_submission() {
    let (t, _) = memory_service_with_ai(AI_PASS);

    let submission = saved(
        t.service
            .submit(
                SubmitRequest::new("W-4", complete_w4_data())
                    .with_status(SubmissionStatus::Complete),
            )
            .await
            .unwrap(),
    );

    assert_eq!(submission.ai_validation.unwrap()["isValid"], json!(true));
}

#[tokio::test]
async fn field_errors_short_circuit_ai_review() {
    let (t, backend) = memory_service_with_ai(AI_PASS);

    let outcome = t
        .service
        .submit(
            SubmitRequest::new("W-4", incomplete_w4_data()).with_status(SubmissionStatus::Complete),
        )
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Rejected(Rejection::FieldErrors(_))));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn unknown_form_lookup_depends_on_ai() {
    let t = memory_service();
    assert_eq!(t.service.get_form("DS-11").await.unwrap(), None);

    let (t, backend) = memory_service_with_ai(
        r#"{"formName": "Application for a U.S. Passport", "requiredDocuments": ["Photo"]}"#,
    );
    match t.service.get_form("DS-11").await.unwrap() {
        Some(FormLookup::Ai(analysis)) => {
            assert_eq!(analysis.form_name.as_deref(), Some("Application for a U.S. Passport"));
            assert_eq!(analysis.required_documents, vec!["Photo".to_string()]);
        }
        other => panic!("expected AI analysis, got {other:?}"),
    }
    assert_eq!(backend.call_count(), 1);

    assert!(matches!(
        t.service.get_form("W-4").await.unwrap(),
        Some(FormLookup::Database(_))
    ));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn ai_outage_propagates_as_error() {
    let t = memory_service();
    let backend = std::sync::Arc::new(govform_assist::MockBackend::default().with_available(false));
    let service = t
        .service
        .with_assist(govform_assist::AssistGateway::new(backend));

    let err = service
        .submit(
            SubmitRequest::new("W-4", complete_w4_data()).with_status(SubmissionStatus::Complete),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, govform_core::ServiceError::Assist(_)));
    assert!(!err.is_client_error());
    assert_eq!(t.submissions.write_count(), 0);
}
