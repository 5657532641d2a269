// Change Notification Model

use crate::domain::job::Job;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Mutation that produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "Create"),
            Operation::Update => write!(f, "Update"),
            Operation::Replace => write!(f, "Replace"),
        }
    }
}

/// Settings shared by every notifier that builds queue messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSettings {
    /// Schema version stamped on each message
    pub message_version: u32,
    /// Base URL used to build the `apiEndpoint` callback
    pub api_endpoint: Option<String>,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            message_version: 1,
            api_endpoint: None,
        }
    }
}

/// Message handed to the queue transport after a committed mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    pub id: String,
    pub external_id: String,
    pub version: u32,
    pub operation: Operation,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

impl QueueMessage {
    pub fn build(
        job: &Job,
        operation: Operation,
        settings: &MessageSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let api_endpoint = settings
            .api_endpoint
            .as_deref()
            .filter(|base| !base.is_empty())
            .map(|base| format!("{}/jobs/{}", base.trim_end_matches('/'), job.external_id));

        Self {
            id: job.id.clone(),
            external_id: job.external_id.clone(),
            version: settings.message_version,
            operation,
            timestamp: now.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            api_endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::JobFields;
    use chrono::TimeZone;
    use serde_json::json;

    fn job() -> Job {
        let doc = json!({
            "approach": "External",
            "title": "Policy Advisor",
            "description": "Advise",
            "organisation": "Ministry of Defence",
            "location": [],
            "grade": "Grade 7",
            "assignment_type": "Permanent",
            "work_location": [],
            "working_pattern": [],
            "personal_spec": "Spec",
            "apply_detail": "Portal",
            "date_posted": "2026-10-01T00:00:00Z",
            "closing_date": "2026-11-01T00:00:00Z",
            "profession": "Policy",
            "recruitment_email": "r@example.com"
        });
        let fields = match doc {
            serde_json::Value::Object(map) => JobFields::from_storage(map).unwrap(),
            _ => unreachable!(),
        };
        Job::new("internal-1", "ext-1", fields)
    }

    #[test]
    fn test_message_wire_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let message = QueueMessage::build(&job(), Operation::Create, &MessageSettings::default(), now);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "internal-1",
                "externalId": "ext-1",
                "version": 1,
                "operation": "Create",
                "timestamp": "2026-10-16T12:00:00+00:00"
            })
        );
    }

    #[test]
    fn test_api_endpoint_is_joined_without_double_slash() {
        let settings = MessageSettings {
            message_version: 2,
            api_endpoint: Some("https://jobs.example.com/".to_string()),
        };
        let message = QueueMessage::build(&job(), Operation::Replace, &settings, Utc::now());

        assert_eq!(message.version, 2);
        assert_eq!(
            message.api_endpoint.as_deref(),
            Some("https://jobs.example.com/jobs/ext-1")
        );
    }
}
