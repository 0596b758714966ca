use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::hr_client::{ApplyError, JobFetchError};
use crate::storage::UploadError;

/// Application-level error type for the HTTP surface.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Bodies follow the `{success: false, message}` envelope, except uploads,
/// which answer `{error}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream returned non-JSON body: {raw}")]
    MalformedUpstream { raw: String },

    #[error("Upstream unreachable: {0}")]
    Server(String),

    #[error("No file provided")]
    MissingFile,

    #[error("Storage error: {0}")]
    Storage(#[from] UploadError),
}

impl From<JobFetchError> for AppError {
    fn from(e: JobFetchError) -> Self {
        match e {
            JobFetchError::Status { status } => AppError::Upstream {
                status,
                message: "Failed to fetch job details".to_string(),
            },
            other => AppError::Server(other.to_string()),
        }
    }
}

impl From<ApplyError> for AppError {
    fn from(e: ApplyError) -> Self {
        match e {
            ApplyError::Rejected { status, message } => AppError::Upstream { status, message },
            ApplyError::MalformedResponse { raw, .. } => AppError::MalformedUpstream { raw },
            ApplyError::Network(e) => AppError::Server(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": msg }),
            ),
            AppError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "success": false, "message": message }),
            ),
            AppError::MalformedUpstream { raw } => {
                tracing::warn!("Upstream returned non-JSON body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": "Invalid JSON response", "raw": raw }),
                )
            }
            AppError::Server(detail) => {
                tracing::error!("Upstream request failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": "Server error" }),
                )
            }
            AppError::MissingFile => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No file provided" }),
            ),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.reason }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
