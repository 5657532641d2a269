//! Route Handlers

use crate::error::ApiError;
use crate::types::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jobs_core::domain::field_map::{self, FieldMap};
use jobs_core::domain::Job;
use jobs_core::error::AppError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};

/// Everything but RFC 3986 unreserved characters is escaped in a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

type Body = Result<Json<FieldMap>, JsonRejection>;

fn location(external_id: &str) -> String {
    format!("/jobs/{}", utf8_percent_encode(external_id, PATH_SEGMENT))
}

fn wire(job: &Job) -> Result<Json<FieldMap>, ApiError> {
    let storage = job.to_storage().map_err(AppError::from)?;
    Ok(Json(field_map::to_wire(&storage)))
}

/// GET /jobs
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FieldMap>>, ApiError> {
    let summaries = state.jobs.list_summaries().await?;
    let body = summaries
        .iter()
        .map(|summary| {
            summary
                .to_storage()
                .map(|doc| field_map::to_wire(&doc))
                .map_err(AppError::from)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(body))
}

/// POST /jobs
pub async fn create(State(state): State<AppState>, body: Body) -> Result<Response, ApiError> {
    let Json(payload) = body?;
    let job = state.jobs.create(&payload).await?;

    let mut headers = HeaderMap::new();
    // Percent-encoded, so always visible ASCII
    if let Ok(value) = HeaderValue::from_str(&location(&job.external_id)) {
        headers.insert(header::LOCATION, value);
    }

    Ok((StatusCode::CREATED, headers, wire(&job)?).into_response())
}

/// GET /jobs/{external_id}
pub async fn get(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<FieldMap>, ApiError> {
    let job = state.jobs.get(&external_id).await?;
    wire(&job)
}

/// PUT /jobs/{external_id}
pub async fn replace(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    body: Body,
) -> Result<Json<FieldMap>, ApiError> {
    let Json(payload) = body?;
    let job = state.jobs.replace(&external_id, &payload).await?;
    wire(&job)
}

/// PATCH /jobs/{external_id}
pub async fn patch(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    body: Body,
) -> Result<Json<FieldMap>, ApiError> {
    let Json(payload) = body?;
    let job = state.jobs.patch(&external_id, &payload).await?;
    wire(&job)
}

pub async fn livez() -> Json<Value> {
    tracing::trace!("service is live");
    Json(json!({ "status": "ok" }))
}

/// 503 while the store does not answer
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.jobs.health_check().await {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "detail": "Database unavailable" })),
            )
                .into_response()
        }
    }
}
