// SQLite row representation and shared SQL for the jobs table

use chrono::{DateTime, SecondsFormat, Utc};
use jobs_core::domain::{Job, JobFields, JobSummary};
use jobs_core::error::{AppError, Result};
use serde_json::Value;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

pub(crate) type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

pub(crate) const SELECT_JOB: &str = r#"
    SELECT id, external_id, version,
           approach, title, description, organisation, location, grade,
           assignment_type, work_location, working_pattern, personal_spec,
           apply_detail, date_posted, closing_date, profession, recruitment_email,
           contacts, nationality_requirement, summary, apply_url, benefits, salary,
           job_numbers, success_profile_details, diversity_statement,
           disability_confident, dc_status, redeployment_scheme, prison_scheme,
           veteran_scheme, criminal_record_check, complaints_info,
           working_for_the_civil_service, eligibility_check, attachments
    FROM jobs
"#;

pub(crate) const SELECT_SUMMARY: &str =
    "SELECT id, external_id, version, title, approach, closing_date FROM jobs";

pub(crate) const INSERT_JOB: &str = r#"
    INSERT INTO jobs (
        approach, title, description, organisation, location, grade,
        assignment_type, work_location, working_pattern, personal_spec,
        apply_detail, date_posted, closing_date, profession, recruitment_email,
        contacts, nationality_requirement, summary, apply_url, benefits, salary,
        job_numbers, success_profile_details, diversity_statement,
        disability_confident, dc_status, redeployment_scheme, prison_scheme,
        veteran_scheme, criminal_record_check, complaints_info,
        working_for_the_civil_service, eligibility_check, attachments,
        id, external_id, version
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

// Conditional write: only succeeds when nobody bumped the version since our read
pub(crate) const UPDATE_JOB: &str = r#"
    UPDATE jobs
    SET approach = ?, title = ?, description = ?, organisation = ?, location = ?, grade = ?,
        assignment_type = ?, work_location = ?, working_pattern = ?, personal_spec = ?,
        apply_detail = ?, date_posted = ?, closing_date = ?, profession = ?, recruitment_email = ?,
        contacts = ?, nationality_requirement = ?, summary = ?, apply_url = ?, benefits = ?, salary = ?,
        job_numbers = ?, success_profile_details = ?, diversity_statement = ?,
        disability_confident = ?, dc_status = ?, redeployment_scheme = ?, prison_scheme = ?,
        veteran_scheme = ?, criminal_record_check = ?, complaints_info = ?,
        working_for_the_civil_service = ?, eligibility_check = ?, attachments = ?,
        version = ?
    WHERE id = ? AND version = ?
"#;

/// Bind the 34 descriptive columns, in the order used by INSERT_JOB / UPDATE_JOB
pub(crate) fn bind_fields<'q>(query: SqliteQuery<'q>, fields: &JobFields) -> Result<SqliteQuery<'q>> {
    Ok(query
        .bind(fields.approach.clone())
        .bind(fields.title.clone())
        .bind(fields.description.clone())
        .bind(fields.organisation.clone())
        .bind(serde_json::to_string(&fields.location)?)
        .bind(fields.grade.clone())
        .bind(fields.assignment_type.clone())
        .bind(serde_json::to_string(&fields.work_location)?)
        .bind(serde_json::to_string(&fields.working_pattern)?)
        .bind(fields.personal_spec.clone())
        .bind(fields.apply_detail.clone())
        .bind(encode_timestamp(&fields.date_posted))
        .bind(encode_timestamp(&fields.closing_date))
        .bind(fields.profession.clone())
        .bind(fields.recruitment_email.clone())
        .bind(encode_json(&fields.contacts)?)
        .bind(fields.nationality_requirement.clone())
        .bind(fields.summary.clone())
        .bind(fields.apply_url.clone())
        .bind(fields.benefits.clone())
        .bind(encode_json(&fields.salary)?)
        .bind(fields.job_numbers)
        .bind(fields.success_profile_details.clone())
        .bind(fields.diversity_statement.clone())
        .bind(fields.disability_confident.clone())
        .bind(fields.dc_status.clone())
        .bind(fields.redeployment_scheme.clone())
        .bind(fields.prison_scheme.clone())
        .bind(fields.veteran_scheme.clone())
        .bind(fields.criminal_record_check.clone())
        .bind(fields.complaints_info.clone())
        .bind(fields.working_for_the_civil_service.clone())
        .bind(fields.eligibility_check.clone())
        .bind(encode_json(&fields.attachments)?))
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn encode_json(value: &Option<Value>) -> Result<Option<String>> {
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(serde_json::to_string(v)?),
    })
}

fn decode_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::Database(format!("Corrupt timestamp in column {}: {}", column, e)))
}

fn decode_json<T: serde::de::DeserializeOwned>(column: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::Database(format!("Corrupt JSON in column {}: {}", column, e)))
}

/// SQLite row representation of a job
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct JobRow {
    id: String,
    external_id: String,
    version: i64,

    approach: String,
    title: String,
    description: String,
    organisation: String,
    location: String, // JSON array
    grade: String,
    assignment_type: String,
    work_location: String,   // JSON array
    working_pattern: String, // JSON array
    personal_spec: String,
    apply_detail: String,
    date_posted: String,  // RFC 3339
    closing_date: String, // RFC 3339
    profession: String,
    recruitment_email: String,

    contacts: Option<String>, // JSON
    nationality_requirement: Option<String>,
    summary: Option<String>,
    apply_url: Option<String>,
    benefits: Option<String>,
    salary: Option<String>, // JSON
    job_numbers: Option<i64>,
    success_profile_details: Option<String>,
    diversity_statement: Option<String>,
    disability_confident: Option<String>,
    dc_status: Option<String>,
    redeployment_scheme: Option<String>,
    prison_scheme: Option<String>,
    veteran_scheme: Option<String>,
    criminal_record_check: Option<String>,
    complaints_info: Option<String>,
    working_for_the_civil_service: Option<String>,
    eligibility_check: Option<String>,
    attachments: Option<String>, // JSON
}

impl JobRow {
    pub(crate) fn into_job(self) -> Result<Job> {
        let optional_json = |column: &str, raw: Option<String>| -> Result<Option<Value>> {
            raw.map(|s| decode_json(column, &s)).transpose()
        };

        let fields = JobFields {
            approach: self.approach,
            title: self.title,
            description: self.description,
            organisation: self.organisation,
            location: decode_json("location", &self.location)?,
            grade: self.grade,
            assignment_type: self.assignment_type,
            work_location: decode_json("work_location", &self.work_location)?,
            working_pattern: decode_json("working_pattern", &self.working_pattern)?,
            personal_spec: self.personal_spec,
            apply_detail: self.apply_detail,
            date_posted: decode_timestamp("date_posted", &self.date_posted)?,
            closing_date: decode_timestamp("closing_date", &self.closing_date)?,
            profession: self.profession,
            recruitment_email: self.recruitment_email,
            contacts: optional_json("contacts", self.contacts)?,
            nationality_requirement: self.nationality_requirement,
            summary: self.summary,
            apply_url: self.apply_url,
            benefits: self.benefits,
            salary: optional_json("salary", self.salary)?,
            job_numbers: self.job_numbers,
            success_profile_details: self.success_profile_details,
            diversity_statement: self.diversity_statement,
            disability_confident: self.disability_confident,
            dc_status: self.dc_status,
            redeployment_scheme: self.redeployment_scheme,
            prison_scheme: self.prison_scheme,
            veteran_scheme: self.veteran_scheme,
            criminal_record_check: self.criminal_record_check,
            complaints_info: self.complaints_info,
            working_for_the_civil_service: self.working_for_the_civil_service,
            eligibility_check: self.eligibility_check,
            attachments: optional_json("attachments", self.attachments)?,
        };

        Ok(Job {
            id: self.id,
            external_id: self.external_id,
            version: self.version,
            fields,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SummaryRow {
    id: String,
    external_id: String,
    version: i64,
    title: String,
    approach: String,
    closing_date: String,
}

impl SummaryRow {
    pub(crate) fn into_summary(self) -> Result<JobSummary> {
        Ok(JobSummary {
            closing_date: decode_timestamp("closing_date", &self.closing_date)?,
            id: self.id,
            external_id: self.external_id,
            version: self.version,
            title: self.title,
            approach: self.approach,
        })
    }
}
