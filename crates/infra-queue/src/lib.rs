// Queue Infrastructure Layer

pub mod settings;
pub mod sqs;

pub use settings::QueueSettings;
pub use sqs::SqsNotifier;

use jobs_core::error::Result;
use jobs_core::port::{ChangeNotifier, NoopNotifier, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Pick the notifier for the configured transport.
///
/// Falls back to NoopNotifier when no queue is configured.
pub async fn resolve_notifier(
    settings: &QueueSettings,
    time_provider: Arc<dyn TimeProvider>,
) -> Result<Arc<dyn ChangeNotifier>> {
    if !settings.is_configured() {
        info!("No queue configured, change notifications are disabled");
        return Ok(Arc::new(NoopNotifier));
    }

    let notifier = SqsNotifier::connect(settings, time_provider).await?;
    info!(
        region = %settings.region,
        endpoint = ?settings.endpoint_override(),
        queue_url = ?settings.queue_url,
        queue_name = ?settings.queue_name,
        "Change notifications enabled"
    );
    Ok(Arc::new(notifier))
}
