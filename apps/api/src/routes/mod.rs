pub mod applications;
pub mod health;
pub mod proxy;

use axum::{
    extract::{multipart::Field, DefaultBodyLimit},
    routing::{get, post},
    Router,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::form::fields::ResumeFile;
use crate::state::AppState;

/// Large enough that the validator, not the transport, rejects oversized resumes.
const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pass-through routes consumed by the form page
        .route("/api/jobs", get(proxy::handle_job_by_query))
        .route("/api/jobs/:job_id", get(proxy::handle_job_by_path))
        .route("/api/apply", post(proxy::handle_apply))
        .route("/api/upload", post(proxy::handle_upload))
        // Full form session: validate, upload, apply
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(applications::handle_submit_application),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

/// Reads a multipart file part. An empty part with no file name means
/// "no file chosen" and yields `None`.
pub(crate) async fn read_file_part(field: Field<'_>) -> Result<Option<ResumeFile>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes: Bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ResumeFile::new(file_name, content_type, bytes)))
}
