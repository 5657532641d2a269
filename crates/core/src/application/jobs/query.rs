// Read-side Use Cases

use crate::domain::{Job, JobSummary};
use crate::error::{AppError, Result};
use crate::port::JobRepository;

pub async fn list_summaries(job_repo: &dyn JobRepository) -> Result<Vec<JobSummary>> {
    job_repo.list_summaries().await
}

/// Get a job by external ID
///
/// # Errors
/// - AppError::NotFound (message echoes the external ID)
pub async fn get(job_repo: &dyn JobRepository, external_id: &str) -> Result<Job> {
    job_repo
        .find_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound(super::not_found_message(external_id)))
}
