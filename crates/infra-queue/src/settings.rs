// Queue transport settings

use jobs_core::domain::MessageSettings;

pub const DEFAULT_REGION: &str = "us-east-1";

/// Where change notifications are published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSettings {
    /// Full queue URL (takes precedence over `queue_name`)
    pub queue_url: Option<String>,
    /// Queue name, resolved to a URL via CreateQueue on first publish
    pub queue_name: Option<String>,
    /// Override for the SQS endpoint (emulators, proxies)
    pub endpoint_url: Option<String>,
    pub region: String,
    pub message: MessageSettings,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            queue_url: None,
            queue_name: None,
            endpoint_url: None,
            region: DEFAULT_REGION.to_string(),
            message: MessageSettings::default(),
        }
    }
}

impl QueueSettings {
    /// True when a queue URL or name is present
    pub fn is_configured(&self) -> bool {
        non_empty(&self.queue_url) || non_empty(&self.queue_name)
    }

    /// Custom endpoint, or None to let the SDK resolve the regional one
    pub fn endpoint_override(&self) -> Option<String> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
