// Best-effort change notification

use crate::domain::{Job, Operation};
use crate::port::ChangeNotifier;
use tracing::warn;

/// Hand a change event to the notifier.
///
/// Called strictly after commit. A transport failure is logged and swallowed:
/// the mutation is already durable and the response must not depend on it.
pub async fn notify_best_effort(notifier: &dyn ChangeNotifier, job: &Job, operation: Operation) {
    if let Err(e) = notifier.notify(job, operation).await {
        warn!(
            error = %e,
            job_id = %job.id,
            external_id = %job.external_id,
            operation = %operation,
            "Change notification failed"
        );
    }
}
