// Job Resource Service - use cases for job postings

pub mod create;
pub mod notify;
pub mod patch;
pub mod query;
pub mod replace;

pub use patch::PatchOutcome;

use crate::domain::field_map::{FieldMap, SYSTEM_FIELDS};
use crate::domain::{DomainError, Job, JobSummary, Operation};
use crate::error::{AppError, Result};
use crate::port::{
    ChangeNotifier, IdProvider, JobRepository, JobRepositoryTransaction,
    TransactionalJobRepository,
};
use serde_json::Value;
use std::sync::Arc;

/// Job Resource Service
///
/// Orchestrates validation, lookup, mutation, version bookkeeping and
/// change notification for job postings. Payloads and results are in
/// wire naming at the HTTP edge; this service speaks storage naming
/// internally via the field mapper.
pub struct JobService {
    job_repo: Arc<dyn JobRepository>,
    tx_job_repo: Arc<dyn TransactionalJobRepository>,
    notifier: Arc<dyn ChangeNotifier>,
    id_provider: Arc<dyn IdProvider>,
}

impl JobService {
    pub fn new(
        job_repo: Arc<dyn JobRepository>,
        tx_job_repo: Arc<dyn TransactionalJobRepository>,
        notifier: Arc<dyn ChangeNotifier>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            job_repo,
            tx_job_repo,
            notifier,
            id_provider,
        }
    }

    pub async fn list_summaries(&self) -> Result<Vec<JobSummary>> {
        query::list_summaries(self.job_repo.as_ref()).await
    }

    pub async fn get(&self, external_id: &str) -> Result<Job> {
        query::get(self.job_repo.as_ref(), external_id).await
    }

    /// Create a job (version 1) and notify `Create`
    pub async fn create(&self, payload: &FieldMap) -> Result<Job> {
        let job = create::execute(
            self.tx_job_repo.as_ref(),
            self.id_provider.as_ref(),
            payload,
        )
        .await?;
        notify::notify_best_effort(self.notifier.as_ref(), &job, Operation::Create).await;
        Ok(job)
    }

    /// Replace every descriptive field and notify `Replace`
    pub async fn replace(&self, external_id: &str, payload: &FieldMap) -> Result<Job> {
        let job = replace::execute(self.tx_job_repo.as_ref(), external_id, payload).await?;
        notify::notify_best_effort(self.notifier.as_ref(), &job, Operation::Replace).await;
        Ok(job)
    }

    /// Apply supplied fields; notifies `Update` only when something was written
    pub async fn patch(&self, external_id: &str, payload: &FieldMap) -> Result<Job> {
        let outcome = patch::execute(self.tx_job_repo.as_ref(), external_id, payload).await?;
        if outcome.changed {
            notify::notify_best_effort(self.notifier.as_ref(), &outcome.job, Operation::Update)
                .await;
        }
        Ok(outcome.job)
    }

    /// Store round trip for readiness probes
    pub async fn health_check(&self) -> Result<()> {
        self.job_repo.ping().await
    }
}

pub(crate) fn not_found_message(external_id: &str) -> String {
    format!("Job with external ID '{}' not found", external_id)
}

/// Remove and validate the `external_id` entry of a create payload
fn take_external_id(doc: &mut FieldMap) -> Result<String> {
    match doc.remove("external_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id),
        Some(Value::Null) | None => Err(DomainError::MissingField("externalId".to_string()).into()),
        Some(_) => Err(AppError::Validation(
            "externalId must be a non-empty string".to_string(),
        )),
    }
}

/// Drop client-supplied values for system-managed fields
fn strip_system_fields(doc: &mut FieldMap) {
    for key in SYSTEM_FIELDS {
        doc.remove(key);
    }
}

async fn not_conflicting(tx: &mut dyn JobRepositoryTransaction, external_id: &str) -> Result<()> {
    match tx.find_by_external_id(external_id).await? {
        Some(_) => Err(AppError::Conflict(format!(
            "Job with external ID '{}' already exists",
            external_id
        ))),
        None => Ok(()),
    }
}

async fn load_for_update(tx: &mut dyn JobRepositoryTransaction, external_id: &str) -> Result<Job> {
    tx.find_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound(not_found_message(external_id)))
}
