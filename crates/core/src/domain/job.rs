// Job Domain Model

use crate::domain::error::{DomainError, Result};
use crate::domain::field_map::FieldMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Internal job ID (UUID v4), storage primary key
pub type JobId = String;

/// Client-assigned identifier used for all public addressing
pub type ExternalId = String;

/// Record version, 1 on creation
pub type Version = i64;

/// Descriptive fields of a job posting (storage naming)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFields {
    // Required
    pub approach: String,
    pub title: String,
    pub description: String,
    pub organisation: String,
    pub location: Vec<Value>,
    pub grade: String,
    pub assignment_type: String,
    pub work_location: Vec<String>,
    pub working_pattern: Vec<String>,
    pub personal_spec: String,
    pub apply_detail: String,
    pub date_posted: DateTime<Utc>,
    pub closing_date: DateTime<Utc>,
    pub profession: String,
    pub recruitment_email: String,

    // Optional
    pub contacts: Option<Value>,
    pub nationality_requirement: Option<String>,
    pub summary: Option<String>,
    pub apply_url: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<Value>,
    pub job_numbers: Option<i64>,
    pub success_profile_details: Option<String>,
    pub diversity_statement: Option<String>,
    pub disability_confident: Option<String>,
    pub dc_status: Option<String>,
    pub redeployment_scheme: Option<String>,
    pub prison_scheme: Option<String>,
    pub veteran_scheme: Option<String>,
    pub criminal_record_check: Option<String>,
    pub complaints_info: Option<String>,
    pub working_for_the_civil_service: Option<String>,
    pub eligibility_check: Option<String>,
    pub attachments: Option<Value>,
}

impl JobFields {
    /// Build from a storage-format document. Unknown keys are ignored.
    pub fn from_storage(doc: FieldMap) -> Result<Self> {
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| DomainError::ValidationError(e.to_string()))
    }

    pub fn to_storage(&self) -> serde_json::Result<FieldMap> {
        into_object(serde_json::to_value(self)?)
    }

    /// Overlay `changes` onto the current values and re-validate the result
    pub fn merged(&self, changes: FieldMap) -> Result<Self> {
        let mut doc = self
            .to_storage()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        doc.extend(changes);
        Self::from_storage(doc)
    }
}

/// Job Entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub external_id: ExternalId,
    pub version: Version,

    #[serde(flatten)]
    pub fields: JobFields,
}

impl Job {
    /// Create a new Job at version 1
    ///
    /// # Arguments
    ///
    /// * `id` - Internal ID (injected, not generated)
    /// * `external_id` - Client-assigned external ID
    /// * `fields` - Validated descriptive fields
    pub fn new(id: impl Into<String>, external_id: impl Into<String>, fields: JobFields) -> Self {
        Self {
            id: id.into(),
            external_id: external_id.into(),
            version: 1,
            fields,
        }
    }

    /// Overwrite every descriptive field (full replace)
    pub fn replace_fields(&mut self, fields: JobFields) {
        self.fields = fields;
        self.version += 1;
    }

    /// Apply a partial change set (storage naming).
    ///
    /// The job is left untouched when the merged fields fail validation.
    pub fn apply_changes(&mut self, changes: FieldMap) -> Result<()> {
        self.fields = self.fields.merged(changes)?;
        self.version += 1;
        Ok(())
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id.clone(),
            external_id: self.external_id.clone(),
            version: self.version,
            title: self.fields.title.clone(),
            approach: self.fields.approach.clone(),
            closing_date: self.fields.closing_date,
        }
    }

    /// Full record in storage naming (identifiers included)
    pub fn to_storage(&self) -> serde_json::Result<FieldMap> {
        into_object(serde_json::to_value(self)?)
    }
}

/// Reduced projection returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    pub external_id: ExternalId,
    pub version: Version,
    pub title: String,
    pub approach: String,
    pub closing_date: DateTime<Utc>,
}

impl JobSummary {
    pub fn to_storage(&self) -> serde_json::Result<FieldMap> {
        into_object(serde_json::to_value(self)?)
    }
}

fn into_object(value: Value) -> serde_json::Result<FieldMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
