// Job Repository Port (Interface)

use crate::domain::{Job, JobSummary};
use crate::error::Result;
use async_trait::async_trait;

/// Read-side repository interface for Job persistence.
///
/// Mutations go through `TransactionalJobRepository`.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Summaries of every stored job, in store order
    async fn list_summaries(&self) -> Result<Vec<JobSummary>>;

    /// Find job by external ID
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Job>>;

    /// Total number of stored jobs
    async fn count(&self) -> Result<i64>;

    /// Cheap round trip to the store (health probe)
    async fn ping(&self) -> Result<()>;
}
