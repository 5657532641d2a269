// Field Mapper - wire (camelCase) <-> storage (snake_case) translation
//
// Every Job field has one entry in FIELDS. Keys that are not in the table
// pass through unchanged in both directions. Values are normalized according
// to the entry's FieldKind; normalization never fails and is idempotent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A JSON object keyed by field name (wire or storage naming)
pub type FieldMap = Map<String, Value>;

/// Shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// System-managed identifier (`id`, `externalId`)
    Identifier,
    /// Free text
    Text,
    /// Enumerated value, carried as its primitive representation
    Choice,
    Integer,
    /// Date-time, always emitted as RFC 3339 with an explicit UTC offset
    Timestamp,
    /// Nested lists / objects, normalized recursively
    Structured,
}

/// One row of the mapping table
#[derive(Debug)]
pub struct FieldSpec {
    pub wire: &'static str,
    pub storage: &'static str,
    pub kind: FieldKind,
}

const fn field(wire: &'static str, storage: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        wire,
        storage,
        kind,
    }
}

/// Fields owned by the system; never part of a client change set
pub const SYSTEM_FIELDS: [&str; 3] = ["id", "external_id", "version"];

pub const FIELDS: &[FieldSpec] = &[
    // Identity
    field("id", "id", FieldKind::Identifier),
    field("externalId", "external_id", FieldKind::Identifier),
    field("version", "version", FieldKind::Integer),
    // Required
    field("approach", "approach", FieldKind::Choice),
    field("title", "title", FieldKind::Text),
    field("description", "description", FieldKind::Text),
    field("organisation", "organisation", FieldKind::Text),
    field("location", "location", FieldKind::Structured),
    field("grade", "grade", FieldKind::Choice),
    field("assignmentType", "assignment_type", FieldKind::Choice),
    field("workLocation", "work_location", FieldKind::Structured),
    field("workingPattern", "working_pattern", FieldKind::Structured),
    field("personalSpec", "personal_spec", FieldKind::Text),
    field("applyDetail", "apply_detail", FieldKind::Text),
    field("datePosted", "date_posted", FieldKind::Timestamp),
    field("dateClosing", "closing_date", FieldKind::Timestamp),
    field("profession", "profession", FieldKind::Choice),
    field("recruitmentEmail", "recruitment_email", FieldKind::Text),
    // Optional
    field("contacts", "contacts", FieldKind::Structured),
    field(
        "nationalityRequirement",
        "nationality_requirement",
        FieldKind::Text,
    ),
    field("summary", "summary", FieldKind::Text),
    field("applyUrl", "apply_url", FieldKind::Text),
    field("benefits", "benefits", FieldKind::Text),
    field("salary", "salary", FieldKind::Structured),
    field("jobNumbers", "job_numbers", FieldKind::Integer),
    field(
        "successProfileDetails",
        "success_profile_details",
        FieldKind::Text,
    ),
    field("diversityStatement", "diversity_statement", FieldKind::Text),
    field("disabilityConfident", "disability_confident", FieldKind::Text),
    field("dcStatus", "dc_status", FieldKind::Choice),
    field("redeploymentScheme", "redeployment_scheme", FieldKind::Text),
    field("prisonScheme", "prison_scheme", FieldKind::Text),
    field("veteranScheme", "veteran_scheme", FieldKind::Text),
    field("criminalRecordCheck", "criminal_record_check", FieldKind::Text),
    field("complaintsInfo", "complaints_info", FieldKind::Text),
    field(
        "workingForTheCivilService",
        "working_for_the_civil_service",
        FieldKind::Text,
    ),
    field("eligibilityCheck", "eligibility_check", FieldKind::Text),
    field("attachments", "attachments", FieldKind::Structured),
];

struct FieldIndex {
    by_wire: HashMap<&'static str, &'static FieldSpec>,
    by_storage: HashMap<&'static str, &'static FieldSpec>,
}

static INDEX: LazyLock<FieldIndex> = LazyLock::new(|| FieldIndex {
    by_wire: FIELDS.iter().map(|f| (f.wire, f)).collect(),
    by_storage: FIELDS.iter().map(|f| (f.storage, f)).collect(),
});

/// Translate a wire-format document into storage naming
pub fn to_storage(wire: &FieldMap) -> FieldMap {
    wire.iter()
        .map(|(key, value)| match INDEX.by_wire.get(key.as_str()) {
            Some(spec) => (spec.storage.to_string(), normalize(spec.kind, value)),
            None => (key.clone(), normalize(FieldKind::Structured, value)),
        })
        .collect()
}

/// Translate a storage-format document into wire naming
pub fn to_wire(storage: &FieldMap) -> FieldMap {
    storage
        .iter()
        .map(|(key, value)| match INDEX.by_storage.get(key.as_str()) {
            Some(spec) => (spec.wire.to_string(), normalize(spec.kind, value)),
            None => (key.clone(), normalize(FieldKind::Structured, value)),
        })
        .collect()
}

/// True when `storage_name` is a descriptive (client-editable) Job field
pub fn is_job_field(storage_name: &str) -> bool {
    INDEX.by_storage.contains_key(storage_name) && !SYSTEM_FIELDS.contains(&storage_name)
}

/// Normalize a single value for the given field shape
pub fn normalize(kind: FieldKind, value: &Value) -> Value {
    match (kind, value) {
        (_, Value::Null) => Value::Null,
        (FieldKind::Timestamp, Value::String(raw)) => normalize_timestamp(raw)
            .map(Value::String)
            .unwrap_or_else(|| value.clone()),
        (FieldKind::Structured, Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| normalize(FieldKind::Structured, item))
                .collect(),
        ),
        (FieldKind::Structured, Value::Object(entries)) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), normalize(FieldKind::Structured, v)))
                .collect(),
        ),
        (
            FieldKind::Identifier | FieldKind::Text | FieldKind::Choice | FieldKind::Integer,
            Value::Array(_) | Value::Object(_),
        ) => Value::String(value.to_string()),
        _ => value.clone(),
    }
}

/// Parse a date-time and render it in UTC with an explicit `+00:00` offset.
///
/// Naive date-times (and bare dates, at midnight) are taken as UTC.
/// Returns None when the string is not a recognizable date-time.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
