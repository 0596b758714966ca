//! Pass-through routes: fetch upstream, reshape, return.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::routes::read_file_part;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

/// Takes `jobId` out of an apply body. Numeric ids are accepted as-is.
fn take_job_id(body: &mut Map<String, Value>) -> Option<String> {
    match body.remove("jobId")? {
        Value::String(id) => non_empty(Some(id)),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

async fn job_envelope(state: &AppState, job_id: &str) -> Result<Json<Value>, AppError> {
    let data = state.hr_api.fetch_job_value(job_id).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

/// GET /api/jobs?jobId=...
pub async fn handle_job_by_query(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<Value>, AppError> {
    let job_id = non_empty(query.job_id)
        .ok_or_else(|| AppError::Validation("jobId is required".to_string()))?;
    job_envelope(&state, &job_id).await
}

/// GET /api/jobs/:job_id
pub async fn handle_job_by_path(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    job_envelope(&state, &job_id).await
}

/// POST /api/apply
///
/// Forwards every key except `jobId` to the remote apply endpoint untouched.
pub async fn handle_apply(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(mut body) = body?;
    let job_id =
        take_job_id(&mut body).ok_or_else(|| AppError::Validation("Missing jobId".to_string()))?;

    let data = state.hr_api.apply(&job_id, &body).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

/// POST /api/upload
///
/// Stores the multipart `file` part and returns its public URL.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file) = read_file_part(field).await? else {
            break;
        };
        let url = state.resume_store.upload(&file).await?;
        info!("Stored upload {} as {url}", file.file_name);
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::MissingFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test bodies are objects"),
        }
    }

    #[test]
    fn test_take_job_id_removes_key() {
        let mut map = body(json!({ "jobId": "j-1", "full_name": "Ada" }));
        assert_eq!(take_job_id(&mut map).as_deref(), Some("j-1"));
        assert_eq!(map, body(json!({ "full_name": "Ada" })));
    }

    #[test]
    fn test_take_job_id_accepts_numbers() {
        let mut map = body(json!({ "jobId": 17 }));
        assert_eq!(take_job_id(&mut map).as_deref(), Some("17"));
    }

    #[test]
    fn test_take_job_id_rejects_blank_and_missing() {
        assert_eq!(take_job_id(&mut body(json!({ "jobId": "  " }))), None);
        assert_eq!(take_job_id(&mut body(json!({ "jobId": null }))), None);
        assert_eq!(take_job_id(&mut body(json!({ "email": "a@b.co" }))), None);
    }
}
