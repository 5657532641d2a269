// SQS ChangeNotifier (aws-sdk-sqs)
//
// Requests are SigV4-signed with the default AWS credential chain.
// SQS_ENDPOINT_URL points the client at an emulator (ElasticMQ, LocalStack).

use crate::settings::QueueSettings;
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::config::Region;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client;
use jobs_core::domain::{Job, MessageSettings, Operation, QueueMessage};
use jobs_core::error::{AppError, Result};
use jobs_core::port::{ChangeNotifier, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Publishes QueueMessages to SQS
pub struct SqsNotifier {
    client: Client,
    queue_name: Option<String>,
    // Resolved once per process, then reused
    queue_url: OnceCell<String>,
    message_settings: MessageSettings,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqsNotifier {
    /// Build a notifier with a client from the default AWS config chain
    ///
    /// # Errors
    /// - AppError::Config if neither a queue URL nor a queue name is set
    pub async fn connect(
        settings: &QueueSettings,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        ensure_configured(settings)?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(OPERATION_TIMEOUT)
                    .build(),
            );
        if let Some(endpoint) = settings.endpoint_override() {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        Self::with_client(Client::new(&sdk_config), settings, time_provider)
    }

    /// Build a notifier around an existing client
    pub fn with_client(
        client: Client,
        settings: &QueueSettings,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        ensure_configured(settings)?;
        let non_blank = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        Ok(Self {
            client,
            queue_name: non_blank(&settings.queue_name),
            queue_url: OnceCell::new_with(non_blank(&settings.queue_url)),
            message_settings: settings.message.clone(),
            time_provider,
        })
    }

    async fn queue_url(&self) -> Result<&str> {
        let url = self
            .queue_url
            .get_or_try_init(|| self.create_queue())
            .await?;
        Ok(url.as_str())
    }

    /// CreateQueue is idempotent on SQS: it returns the existing queue's URL
    async fn create_queue(&self) -> Result<String> {
        let queue_name = self
            .queue_name
            .as_deref()
            .ok_or_else(|| AppError::Config("SQS_QUEUE_NAME is not set".to_string()))?;

        let output = self
            .client
            .create_queue()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| {
                AppError::Transport(format!("CreateQueue failed: {}", DisplayErrorContext(&e)))
            })?;

        let queue_url = output
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| AppError::Transport("CreateQueue returned no queue URL".to_string()))?;

        info!(queue_name = %queue_name, queue_url = %queue_url, "Resolved queue URL");
        Ok(queue_url)
    }
}

fn ensure_configured(settings: &QueueSettings) -> Result<()> {
    if settings.is_configured() {
        Ok(())
    } else {
        Err(AppError::Config(
            "SQS_QUEUE_URL or SQS_QUEUE_NAME must be provided".to_string(),
        ))
    }
}

#[async_trait]
impl ChangeNotifier for SqsNotifier {
    async fn notify(&self, job: &Job, operation: Operation) -> Result<()> {
        let queue_url = self.queue_url().await?;
        let message = QueueMessage::build(
            job,
            operation,
            &self.message_settings,
            self.time_provider.now(),
        );

        let output = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(serde_json::to_string(&message)?)
            .send()
            .await
            .map_err(|e| {
                AppError::Transport(format!("SendMessage failed: {}", DisplayErrorContext(&e)))
            })?;

        debug!(
            external_id = %job.external_id,
            operation = %operation,
            message_id = ?output.message_id(),
            "Change notification published"
        );
        Ok(())
    }
}
