//! Sample data for empty stores

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use jobs_core::application::JobService;
use jobs_core::domain::FieldMap;
use jobs_core::port::JobRepository;
use serde_json::{json, Value};
use tracing::info;

const SAMPLE_EXTERNAL_ID: &str = "seed-001";
const SAMPLE_OPEN_DAYS: i64 = 30;

fn sample_posting(now: DateTime<Utc>) -> FieldMap {
    let closing = now + Duration::days(SAMPLE_OPEN_DAYS);
    let doc = json!({
        "externalId": SAMPLE_EXTERNAL_ID,
        "approach": "External",
        "title": "Policy Advisor",
        "description": "This is a fantastic job for a policy advisor...",
        "organisation": "Ministry of Defence",
        "location": [{
            "townName": "Bristol",
            "region": "South West",
            "latitude": 51.4545,
            "longitude": -2.5879
        }],
        "grade": "Grade 7",
        "assignmentType": "Permanent",
        "workLocation": ["Office based"],
        "workingPattern": ["Full-time"],
        "personalSpec": "Some personal specification text",
        "applyDetail": "Apply via careers portal",
        "datePosted": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        "dateClosing": closing.to_rfc3339_opts(SecondsFormat::Secs, true),
        "profession": "Policy",
        "recruitmentEmail": "recruitment@civilservice.gov.uk"
    });
    match doc {
        Value::Object(map) => map,
        _ => FieldMap::new(),
    }
}

/// Insert the sample posting unless the store already holds jobs.
///
/// Returns the number of postings inserted.
pub async fn seed_if_empty(
    job_repo: &dyn JobRepository,
    service: &JobService,
    now: DateTime<Utc>,
) -> anyhow::Result<usize> {
    let existing = job_repo.count().await?;
    if existing > 0 {
        info!(existing, "Store already contains jobs, skipping seed");
        return Ok(0);
    }

    let job = service.create(&sample_posting(now)).await?;
    info!(external_id = %job.external_id, "Seeded sample job");
    Ok(1)
}
