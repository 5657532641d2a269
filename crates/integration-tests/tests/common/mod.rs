// Shared fixtures for the integration suites
#![allow(dead_code)]

use async_trait::async_trait;
use jobs_core::application::JobService;
use jobs_core::domain::{FieldMap, Job, Operation};
use jobs_core::error::{AppError, Result};
use jobs_core::port::id_provider::UuidProvider;
use jobs_core::port::ChangeNotifier;
use jobs_infra_sqlite::{create_pool, run_migrations, SqliteJobRepository};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Notifier that remembers every call and can be told to fail
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, Operation)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, Operation)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn notify(&self, job: &Job, operation: Operation) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((job.external_id.clone(), operation));
        if self.fail {
            return Err(AppError::Transport("queue unreachable".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub service: JobService,
    pub repo: Arc<SqliteJobRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn harness_at(database_url: &str, notifier: RecordingNotifier) -> Harness {
    let pool = create_pool(database_url, 4).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteJobRepository::new(pool));
    let notifier = Arc::new(notifier);
    let service = JobService::new(
        repo.clone(),
        repo.clone(),
        notifier.clone(),
        Arc::new(UuidProvider),
    );
    Harness {
        service,
        repo,
        notifier,
    }
}

pub async fn harness() -> Harness {
    harness_at("sqlite::memory:", RecordingNotifier::default()).await
}

pub fn object(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Complete wire-format posting
pub fn posting(external_id: &str) -> FieldMap {
    object(json!({
        "externalId": external_id,
        "approach": "External",
        "title": "Digital Delivery Manager",
        "description": "Lead a multidisciplinary team",
        "organisation": "HM Land Registry",
        "location": [{"townName": "Plymouth", "region": "South West", "latitude": 50.37, "longitude": -4.14}],
        "grade": "Grade 7",
        "assignmentType": "Fixed term",
        "workLocation": ["Hybrid"],
        "workingPattern": ["Full-time", "Flexible working"],
        "personalSpec": "Agile delivery experience",
        "applyDetail": "Apply through Civil Service Jobs",
        "datePosted": "2026-10-01T09:30:00+01:00",
        "dateClosing": "2026-10-29 23:55:00",
        "profession": "Digital, Data and Technology",
        "recruitmentEmail": "ddat.recruitment@example.gov.uk",
        "salary": {"minimum": 52000, "maximum": 60000, "currency": "GBP"},
        "jobNumbers": 2
    }))
}

/// Unique on-disk database URL under the system temp dir
pub fn temp_database_url(label: &str) -> (String, std::path::PathBuf) {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "jobs_{}_{}_{}.db",
        label,
        std::process::id(),
        nanos
    ));
    (format!("sqlite://{}", path.display()), path)
}

pub fn remove_database(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}
