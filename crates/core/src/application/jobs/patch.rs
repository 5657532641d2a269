// Partial Update Use Case

use super::load_for_update;
use crate::domain::field_map::{self, FieldMap};
use crate::domain::Job;
use crate::error::{AppError, Result};
use crate::port::TransactionalJobRepository;
use serde_json::Value;
use tracing::{debug, info};

/// Result of a partial update
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub job: Job,
    /// False when the payload carried no descriptive field (nothing written)
    pub changed: bool,
}

/// Execute partial update use case
///
/// Only descriptive Job fields present in the payload are applied. An
/// `externalId` in the body is accepted only if it equals the path's.
pub async fn execute(
    job_repo: &dyn TransactionalJobRepository,
    external_id: &str,
    payload: &FieldMap,
) -> Result<PatchOutcome> {
    let mut doc = field_map::to_storage(payload);
    if let Some(body_id) = doc.remove("external_id") {
        if !body_id.is_null() && body_id != Value::String(external_id.to_string()) {
            return Err(AppError::BadRequest(format!(
                "External ID of job '{}' cannot be changed",
                external_id
            )));
        }
    }

    let changes: FieldMap = doc
        .into_iter()
        .filter(|(key, _)| field_map::is_job_field(key))
        .collect();

    let mut tx = job_repo.begin_transaction().await?;
    let loaded = load_for_update(tx.as_mut(), external_id).await;
    let mut job = match loaded {
        Ok(job) => job,
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    };

    if changes.is_empty() {
        tx.rollback().await?;
        debug!(external_id = %external_id, "Empty patch, nothing to apply");
        return Ok(PatchOutcome {
            job,
            changed: false,
        });
    }

    let read_version = job.version;
    let changed_fields: Vec<String> = changes.keys().cloned().collect();
    if let Err(e) = job.apply_changes(changes) {
        tx.rollback().await?;
        return Err(e.into());
    }
    tx.update(&job, read_version).await?;
    tx.commit().await?;

    info!(
        job_id = %job.id,
        external_id = %job.external_id,
        version = job.version,
        fields = ?changed_fields,
        "Job patched"
    );
    Ok(PatchOutcome { job, changed: true })
}
