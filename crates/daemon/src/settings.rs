//! Process configuration, read from environment variables

use config::{Config, ConfigError, Environment};
use jobs_api_http::HttpServerConfig;
use jobs_core::domain::MessageSettings;
use jobs_infra_queue::settings::DEFAULT_REGION;
use jobs_infra_queue::QueueSettings;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// QUEUE_MESSAGE_VERSION as found in the environment, validated in `queue()`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMessageVersion {
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub log_format: LogFormat,

    // Queue
    pub sqs_queue_url: Option<String>,
    pub sqs_queue_name: Option<String>,
    pub sqs_endpoint_url: Option<String>,
    #[serde(default = "default_region")]
    pub aws_region: String,
    #[serde(default)]
    pub queue_message_version: Option<RawMessageVersion>,
    pub queue_api_endpoint: Option<String>,
}

fn default_database_url() -> String {
    "sqlite://jobs.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_message_version() -> u32 {
    1
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(source: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn http(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Positive integer, otherwise the default of 1
    fn message_version(&self) -> u32 {
        let parsed = match &self.queue_message_version {
            None => return default_message_version(),
            Some(RawMessageVersion::Number(n)) => u32::try_from(*n).ok(),
            Some(RawMessageVersion::Text(text)) => text.trim().parse::<u32>().ok(),
            Some(RawMessageVersion::Other(_)) => None,
        };
        match parsed.filter(|version| *version > 0) {
            Some(version) => version,
            None => {
                warn!(
                    value = ?self.queue_message_version,
                    "Invalid QUEUE_MESSAGE_VERSION, using default"
                );
                default_message_version()
            }
        }
    }

    pub fn queue(&self) -> QueueSettings {
        QueueSettings {
            queue_url: self.sqs_queue_url.clone(),
            queue_name: self.sqs_queue_name.clone(),
            endpoint_url: self.sqs_endpoint_url.clone(),
            region: self.aws_region.clone(),
            message: MessageSettings {
                message_version: self.message_version(),
                api_endpoint: self.queue_api_endpoint.clone(),
            },
        }
    }
}
