// Transaction port for atomic operations

use crate::domain::{Job, Version};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional JobRepository operations
#[async_trait]
pub trait TransactionalJobRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn JobRepositoryTransaction>>;
}

/// JobRepository operations within a transaction
#[async_trait]
pub trait JobRepositoryTransaction: Transaction {
    /// Find job by external ID (within transaction)
    async fn find_by_external_id(&mut self, external_id: &str) -> Result<Option<Job>>;

    /// Insert job (within transaction)
    ///
    /// A duplicate external ID fails with `AppError::Conflict`.
    async fn insert(&mut self, job: &Job) -> Result<()>;

    /// Conditional write: persists `job` only if the stored version still
    /// equals `expected_version`, otherwise fails with `AppError::Conflict`.
    async fn update(&mut self, job: &Job, expected_version: Version) -> Result<()>;
}
