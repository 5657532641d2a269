// Replace (full update) Use Case

use super::{load_for_update, strip_system_fields};
use crate::domain::field_map::{self, FieldMap};
use crate::domain::{Job, JobFields};
use crate::error::{AppError, Result};
use crate::port::TransactionalJobRepository;
use serde_json::Value;
use tracing::info;

/// Execute replace use case
///
/// The body's external ID must equal the path's; this is checked before any
/// lookup. Every descriptive field is overwritten and the version bumped by
/// exactly one, whether or not any value changed.
pub async fn execute(
    job_repo: &dyn TransactionalJobRepository,
    external_id: &str,
    payload: &FieldMap,
) -> Result<Job> {
    let mut doc = field_map::to_storage(payload);
    match doc.remove("external_id") {
        Some(Value::String(body_id)) if body_id == external_id => {}
        _ => {
            return Err(AppError::BadRequest(format!(
                "External ID in body must match path ID '{}'",
                external_id
            )))
        }
    }
    strip_system_fields(&mut doc);
    let fields = JobFields::from_storage(doc)?;

    let mut tx = job_repo.begin_transaction().await?;
    let loaded = load_for_update(tx.as_mut(), external_id).await;
    let mut job = match loaded {
        Ok(job) => job,
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    };

    let read_version = job.version;
    job.replace_fields(fields);
    tx.update(&job, read_version).await?;
    tx.commit().await?;

    info!(
        job_id = %job.id,
        external_id = %job.external_id,
        version = job.version,
        "Job replaced"
    );
    Ok(job)
}
