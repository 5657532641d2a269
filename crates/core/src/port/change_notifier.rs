// Change Notifier Port

use crate::domain::{Job, Operation};
use crate::error::Result;
use async_trait::async_trait;

/// Best-effort emission of a change event after a committed mutation.
///
/// Implementations:
/// - NoopNotifier: drops every message (no transport configured)
/// - SqsNotifier (infra-queue): publishes to an SQS-compatible queue
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Hand a message describing `operation` on `job` to the transport
    ///
    /// # Errors
    /// - AppError::Transport if the transport rejects or cannot be reached
    async fn notify(&self, job: &Job, operation: Operation) -> Result<()>;
}

/// Notifier used when no queue is configured
pub struct NoopNotifier;

#[async_trait]
impl ChangeNotifier for NoopNotifier {
    async fn notify(&self, job: &Job, operation: Operation) -> Result<()> {
        tracing::debug!(
            external_id = %job.external_id,
            operation = %operation,
            "No queue configured, dropping change notification"
        );
        Ok(())
    }
}
