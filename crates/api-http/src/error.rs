//! HTTP Error Mapping
//!
//! Every failure leaves as `{"detail": "<message>"}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jobs_core::error::AppError;
use serde_json::json;

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Body was not a JSON object
    Body(JsonRejection),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

/// Status code and client-facing message for an application error
pub fn status_and_detail(err: &AppError) -> (StatusCode, String) {
    match err {
        AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
        AppError::Domain(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        AppError::Serialization(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        AppError::Database(_)
        | AppError::Config(_)
        | AppError::Io(_)
        | AppError::Transport(_)
        | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::App(err) => {
                let (status, detail) = status_and_detail(err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                } else {
                    tracing::debug!(status = %status, error = %err, "Request rejected");
                }
                (status, detail)
            }
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
