//! Job lifecycle integration tests
//!
//! Drives JobService against a real SQLite store and checks version
//! bookkeeping and change notifications end to end.

mod common;

use common::{harness, harness_at, object, posting, RecordingNotifier};
use jobs_core::domain::field_map;
use jobs_core::domain::Operation;
use jobs_core::error::AppError;
use jobs_core::port::JobRepository;
use serde_json::json;

#[tokio::test]
async fn test_create_starts_at_version_one() {
    let h = harness().await;

    let created = h.service.create(&posting("ext-1")).await.unwrap();
    assert_eq!(created.version, 1);
    assert_eq!(created.external_id, "ext-1");
    assert!(!created.id.is_empty());

    let fetched = h.service.get("ext-1").await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(h.notifier.sent(), vec![("ext-1".to_string(), Operation::Create)]);
}

#[tokio::test]
async fn test_timestamps_are_normalized_to_utc() {
    let h = harness().await;
    let job = h.service.create(&posting("ext-1")).await.unwrap();

    let wire = field_map::to_wire(&job.to_storage().unwrap());
    assert_eq!(wire["datePosted"], json!("2026-10-01T08:30:00+00:00"));
    assert_eq!(wire["dateClosing"], json!("2026-10-29T23:55:00+00:00"));
    assert_eq!(wire["salary"]["currency"], json!("GBP"));
    assert_eq!(wire["jobNumbers"], json!(2));
}

#[tokio::test]
async fn test_duplicate_create_is_conflict_and_keeps_version() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();
    h.service
        .patch("ext-1", &object(json!({"summary": "First edit"})))
        .await
        .unwrap();

    let err = h.service.create(&posting("ext-1")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let job = h.service.get("ext-1").await.unwrap();
    assert_eq!(job.version, 2);
    assert_eq!(job.fields.summary.as_deref(), Some("First edit"));
    assert_eq!(h.repo.count().await.unwrap(), 1);
    assert_eq!(h.notifier.sent().len(), 2);
}

#[tokio::test]
async fn test_replace_always_bumps_version_by_one() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();

    // Identical body still counts as a replacement
    let second = h.service.replace("ext-1", &posting("ext-1")).await.unwrap();
    assert_eq!(second.version, 2);
    let third = h.service.replace("ext-1", &posting("ext-1")).await.unwrap();
    assert_eq!(third.version, 3);
    assert_eq!(third.id, second.id);

    let ops: Vec<Operation> = h.notifier.sent().into_iter().map(|(_, op)| op).collect();
    assert_eq!(ops, vec![Operation::Create, Operation::Replace, Operation::Replace]);
}

#[tokio::test]
async fn test_replace_ignores_client_system_fields() {
    let h = harness().await;
    let created = h.service.create(&posting("ext-1")).await.unwrap();

    let mut body = posting("ext-1");
    body.insert("id".to_string(), json!("forged"));
    body.insert("version".to_string(), json!(99));
    let replaced = h.service.replace("ext-1", &body).await.unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.version, 2);
}

#[tokio::test]
async fn test_mismatched_replace_is_bad_request_without_side_effects() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();

    let err = h.service.replace("ext-1", &posting("ext-2")).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Checked before lookup: unknown path ID still reports the mismatch
    let err = h.service.replace("missing", &posting("ext-2")).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    assert_eq!(h.service.get("ext-1").await.unwrap().version, 1);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_empty_patch_changes_nothing() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();

    let unchanged = h.service.patch("ext-1", &object(json!({}))).await.unwrap();
    assert_eq!(unchanged.version, 1);

    // Identifier echo and unknown keys are not descriptive fields
    let unchanged = h
        .service
        .patch(
            "ext-1",
            &object(json!({"externalId": "ext-1", "favouriteColour": "green"})),
        )
        .await
        .unwrap();
    assert_eq!(unchanged.version, 1);

    assert_eq!(h.service.get("ext-1").await.unwrap().version, 1);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_patch_applies_supplied_fields_once() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();

    let patched = h
        .service
        .patch(
            "ext-1",
            &object(json!({"title": "Head of Delivery", "dateClosing": "2026-11-15"})),
        )
        .await
        .unwrap();

    assert_eq!(patched.version, 2);
    assert_eq!(patched.fields.title, "Head of Delivery");
    assert_eq!(patched.fields.organisation, "HM Land Registry");
    assert_eq!(
        field_map::to_wire(&patched.to_storage().unwrap())["dateClosing"],
        json!("2026-11-15T00:00:00+00:00")
    );
    assert_eq!(
        h.notifier.sent(),
        vec![
            ("ext-1".to_string(), Operation::Create),
            ("ext-1".to_string(), Operation::Update),
        ]
    );
}

#[tokio::test]
async fn test_invalid_patch_is_rejected_atomically() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();

    let err = h
        .service
        .patch("ext-1", &object(json!({"summary": "ok", "title": null})))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(_)), "got {err:?}");

    let job = h.service.get("ext-1").await.unwrap();
    assert_eq!(job.version, 1);
    assert!(job.fields.summary.is_none());
}

#[tokio::test]
async fn test_patch_cannot_change_external_id() {
    let h = harness().await;
    h.service.create(&posting("ext-1")).await.unwrap();

    let err = h
        .service
        .patch("ext-1", &object(json!({"externalId": "ext-9", "title": "x"})))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(h.service.get("ext-9").await.is_err());
}

#[tokio::test]
async fn test_unknown_external_id_is_not_found() {
    let h = harness().await;

    let err = h.service.get("ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("ghost")));

    let err = h
        .service
        .patch("ghost", &object(json!({"title": "x"})))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = h.service.replace("ghost", &posting("ghost")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_create_requires_external_id() {
    let h = harness().await;

    let mut body = posting("ext-1");
    body.remove("externalId");
    let err = h.service.create(&body).await.unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));

    let mut body = posting("ext-1");
    body.insert("externalId".to_string(), json!("   "));
    let err = h.service.create(&body).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(h.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_returns_summaries() {
    let h = harness().await;
    for ext in ["ext-a", "ext-b", "ext-c"] {
        h.service.create(&posting(ext)).await.unwrap();
    }
    h.service
        .patch("ext-b", &object(json!({"title": "Renamed"})))
        .await
        .unwrap();

    let mut summaries = h.service.list_summaries().await.unwrap();
    summaries.sort_by(|a, b| a.external_id.cmp(&b.external_id));

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[1].external_id, "ext-b");
    assert_eq!(summaries[1].version, 2);
    assert_eq!(summaries[1].title, "Renamed");
    assert_eq!(summaries[0].approach, "External");
}

#[tokio::test]
async fn test_notifier_failure_does_not_fail_mutations() {
    let h = harness_at("sqlite::memory:", RecordingNotifier::failing()).await;

    let created = h.service.create(&posting("ext-1")).await.unwrap();
    assert_eq!(created.version, 1);
    let patched = h
        .service
        .patch("ext-1", &object(json!({"summary": "s"})))
        .await
        .unwrap();
    assert_eq!(patched.version, 2);
    let replaced = h.service.replace("ext-1", &posting("ext-1")).await.unwrap();
    assert_eq!(replaced.version, 3);

    assert_eq!(h.notifier.sent().len(), 3);
    assert_eq!(h.service.get("ext-1").await.unwrap().version, 3);
}

#[tokio::test]
async fn test_scenario_create_patch_replace_duplicate() {
    let h = harness().await;

    let job = h.service.create(&posting("ext-1")).await.unwrap();
    assert_eq!(job.version, 1);

    let summaries = h.service.list_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].version, 1);

    let job = h
        .service
        .patch("ext-1", &object(json!({"summary": "Short summary"})))
        .await
        .unwrap();
    assert_eq!(job.version, 2);

    let mut body = posting("ext-1");
    body.insert("title".to_string(), json!("Senior Delivery Manager"));
    let job = h.service.replace("ext-1", &body).await.unwrap();
    assert_eq!(job.version, 3);
    assert_eq!(job.fields.title, "Senior Delivery Manager");

    let err = h.service.create(&posting("ext-1")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(h.service.get("ext-1").await.unwrap().version, 3);
}
