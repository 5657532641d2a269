//! Critical Edge Case Tests
//!
//! Concurrency and durability behaviour of the SQLite-backed service.

mod common;

use common::{harness_at, object, posting, remove_database, temp_database_url, RecordingNotifier};
use futures::future::join_all;
use jobs_core::error::AppError;
use jobs_core::port::{JobRepository, TransactionalJobRepository};
use serde_json::json;
use std::sync::Arc;

/// Critical Test 1: stale conditional write
/// A writer holding an old version must not overwrite a newer commit.
#[tokio::test]
async fn test_stale_write_is_conflict() {
    let h = harness_at("sqlite::memory:", RecordingNotifier::default()).await;
    h.service.create(&posting("ext-1")).await.unwrap();

    // Snapshot taken before another writer bumps the version
    let mut stale = h.repo.find_by_external_id("ext-1").await.unwrap().unwrap();

    h.service
        .patch("ext-1", &object(json!({"summary": "winner"})))
        .await
        .unwrap();

    let read_version = stale.version;
    stale.fields.summary = Some("loser".to_string());
    stale.version += 1;

    let mut tx = h.repo.begin_transaction().await.unwrap();
    let err = tx.update(&stale, read_version).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
    tx.rollback().await.unwrap();

    let job = h.service.get("ext-1").await.unwrap();
    assert_eq!(job.version, 2);
    assert_eq!(job.fields.summary.as_deref(), Some("winner"));
}

/// Critical Test 2: concurrent creates of one external ID
/// Exactly one wins; the store holds a single record.
#[tokio::test]
async fn test_concurrent_duplicate_creates() {
    let (url, path) = temp_database_url("dup_create");
    let h = Arc::new(harness_at(&url, RecordingNotifier::default()).await);

    let attempts = (0..8).map(|_| {
        let h = h.clone();
        tokio::spawn(async move { h.service.create(&posting("ext-race")).await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "results: {results:?}");
    for result in &results {
        assert!(
            matches!(result, Ok(_) | Err(AppError::Conflict(_))),
            "losing create must be a conflict, got {result:?}"
        );
    }
    assert_eq!(h.repo.count().await.unwrap(), 1);
    assert_eq!(h.service.get("ext-race").await.unwrap().version, 1);
    assert_eq!(h.notifier.sent().len(), 1);

    remove_database(&path);
}

/// Critical Test 3: distinct records do not contend
#[tokio::test]
async fn test_concurrent_creates_of_distinct_jobs() {
    let (url, path) = temp_database_url("distinct");
    let h = Arc::new(harness_at(&url, RecordingNotifier::default()).await);

    let creates = (0..10).map(|i| {
        let h = h.clone();
        tokio::spawn(async move { h.service.create(&posting(&format!("ext-{i}"))).await })
    });
    for joined in join_all(creates).await {
        assert_eq!(joined.unwrap().unwrap().version, 1);
    }

    assert_eq!(h.service.list_summaries().await.unwrap().len(), 10);
    remove_database(&path);
}

/// Critical Test 4: concurrent patches of one record
/// Every writer either lands or sees a conflict; none is lost or fails.
#[tokio::test]
async fn test_concurrent_patches_of_same_job() {
    let (url, path) = temp_database_url("same_patch");
    let h = Arc::new(harness_at(&url, RecordingNotifier::default()).await);
    h.service.create(&posting("ext-1")).await.unwrap();

    let patches = (0..16).map(|i| {
        let h = h.clone();
        tokio::spawn(async move {
            h.service
                .patch("ext-1", &object(json!({"summary": format!("writer {i}")})))
                .await
        })
    });
    let results: Vec<_> = join_all(patches)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let mut successes: i64 = 0;
    for result in &results {
        match result {
            Ok(_) => successes += 1,
            Err(AppError::Conflict(_)) => {}
            Err(other) => panic!("unexpected patch failure: {other:?}"),
        }
    }
    assert!(successes >= 1);

    let job = h.service.get("ext-1").await.unwrap();
    assert_eq!(job.version, 1 + successes);
    // One notification for the create plus one per landed patch
    assert_eq!(h.notifier.sent().len() as i64, 1 + successes);

    remove_database(&path);
}

/// Critical Test 5: concurrent replaces of one record
#[tokio::test]
async fn test_concurrent_replaces_of_same_job() {
    let (url, path) = temp_database_url("same_replace");
    let h = Arc::new(harness_at(&url, RecordingNotifier::default()).await);
    h.service.create(&posting("ext-1")).await.unwrap();

    let replaces = (0..8).map(|_| {
        let h = h.clone();
        tokio::spawn(async move { h.service.replace("ext-1", &posting("ext-1")).await })
    });
    let mut successes: i64 = 0;
    for joined in join_all(replaces).await {
        match joined.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::Conflict(_)) => {}
            Err(other) => panic!("unexpected replace failure: {other:?}"),
        }
    }

    assert_eq!(h.service.get("ext-1").await.unwrap().version, 1 + successes);
    remove_database(&path);
}

/// Critical Test 6: records survive a restart
#[tokio::test]
async fn test_persistence_after_restart() {
    let (url, path) = temp_database_url("restart");

    {
        let h = harness_at(&url, RecordingNotifier::default()).await;
        h.service.create(&posting("ext-1")).await.unwrap();
        h.service
            .patch("ext-1", &object(json!({"summary": "persisted"})))
            .await
            .unwrap();
    }

    // Reopen: migrations are idempotent and data is intact
    let h = harness_at(&url, RecordingNotifier::default()).await;
    let job = h.service.get("ext-1").await.unwrap();
    assert_eq!(job.version, 2);
    assert_eq!(job.fields.summary.as_deref(), Some("persisted"));

    remove_database(&path);
}
