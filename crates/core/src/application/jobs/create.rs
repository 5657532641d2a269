// Create Use Case

use super::{not_conflicting, strip_system_fields, take_external_id};
use crate::domain::field_map::{self, FieldMap};
use crate::domain::{Job, JobFields};
use crate::error::Result;
use crate::port::{IdProvider, TransactionalJobRepository};
use tracing::info;

/// Execute create use case (with transaction for atomicity)
///
/// # Arguments
///
/// * `job_repo` - Transactional job repository
/// * `id_provider` - Internal ID generator (injected for determinism)
/// * `payload` - Full wire-format document, identifiers excluded except `externalId`
pub async fn execute(
    job_repo: &dyn TransactionalJobRepository,
    id_provider: &dyn IdProvider,
    payload: &FieldMap,
) -> Result<Job> {
    let mut doc = field_map::to_storage(payload);
    let external_id = take_external_id(&mut doc)?;
    strip_system_fields(&mut doc);
    let fields = JobFields::from_storage(doc)?;

    let mut tx = job_repo.begin_transaction().await?;

    // Lookup first so a duplicate never reaches the insert
    let existing = not_conflicting(tx.as_mut(), &external_id).await;
    if let Err(conflict) = existing {
        tx.rollback().await?;
        return Err(conflict);
    }

    let job = Job::new(id_provider.generate_id(), external_id, fields);
    tx.insert(&job).await?;
    tx.commit().await?;

    info!(job_id = %job.id, external_id = %job.external_id, "Job created");
    Ok(job)
}
