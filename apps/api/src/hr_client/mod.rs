/// HR API client: the single point of entry for calls to the remote careers API.
///
/// Covers the public job detail read and the application submit. Response
/// bodies are decoded once into `RemoteBody`; nothing downstream sees raw bytes.
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::application::ApplicationPayload;
use crate::models::job::JobPosting;

const APPLY_FALLBACK_MESSAGE: &str = "Application failed";
const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum JobFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HR API returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("application rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed response (status {status}): {raw}")]
    MalformedResponse { status: u16, raw: String },

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApplyError {
    /// Message safe to show the candidate.
    pub fn user_message(&self) -> String {
        match self {
            ApplyError::Rejected { message, .. } => message.clone(),
            ApplyError::MalformedResponse { raw, .. } if !raw.trim().is_empty() => raw.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// A remote response body, decided once at the parse boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteBody {
    Json(Value),
    Text(String),
}

impl RemoteBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => RemoteBody::Json(value),
            Err(_) => RemoteBody::Text(text),
        }
    }
}

/// Submits an application payload for a job. Implemented by `HrApiClient`;
/// tests swap in doubles.
#[async_trait]
pub trait ApplicationSubmitter: Send + Sync {
    async fn submit(&self, job_id: &str, payload: &ApplicationPayload) -> Result<Value, ApplyError>;
}

#[derive(Clone)]
pub struct HrApiClient {
    client: Client,
    base_url: String,
}

impl HrApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches a public job posting as untyped JSON, for pass-through routes.
    pub async fn fetch_job_value(&self, job_id: &str) -> Result<Value, JobFetchError> {
        let url = format!("{}/jobs/public/{}/", self.base_url, job_id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("HR API job fetch for {job_id} returned {status}");
            return Err(JobFetchError::Status {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches and decodes a public job posting.
    pub async fn fetch_job(&self, job_id: &str) -> Result<JobPosting, JobFetchError> {
        let value = self.fetch_job_value(job_id).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Posts an application body as JSON. Non-JSON responses are malformed
    /// regardless of status; non-2xx JSON responses fail with their `detail`.
    pub async fn apply<P>(&self, job_id: &str, payload: &P) -> Result<Value, ApplyError>
    where
        P: Serialize + ?Sized + Sync,
    {
        let url = format!("{}/applications/public/{}/apply", self.base_url, job_id);
        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        let body = RemoteBody::parse(response.text().await?);

        match body {
            RemoteBody::Text(raw) => {
                warn!("HR API apply for {job_id} returned non-JSON body (status {status})");
                Err(ApplyError::MalformedResponse {
                    status: status.as_u16(),
                    raw,
                })
            }
            RemoteBody::Json(value) if !status.is_success() => Err(ApplyError::Rejected {
                status: status.as_u16(),
                message: detail_message(&value),
            }),
            RemoteBody::Json(value) => {
                debug!("HR API accepted application for job {job_id}");
                Ok(value)
            }
        }
    }
}

#[async_trait]
impl ApplicationSubmitter for HrApiClient {
    async fn submit(&self, job_id: &str, payload: &ApplicationPayload) -> Result<Value, ApplyError> {
        self.apply(job_id, payload).await
    }
}

fn detail_message(body: &Value) -> String {
    body.get("detail")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .unwrap_or(APPLY_FALLBACK_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_base_url, spawn_stub};
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    fn payload() -> ApplicationPayload {
        ApplicationPayload {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "+44 20 7946 0000".to_string(),
            resume: Some("https://files.example/1-cv.pdf".to_string()),
            cover_letter: String::new(),
        }
    }

    async fn apply_stub(status: StatusCode, body: &'static str) -> HrApiClient {
        let router = Router::new().route(
            "/applications/public/:job_id/apply",
            post(move || async move { (status, body) }),
        );
        HrApiClient::new(spawn_stub(router).await)
    }

    #[test]
    fn test_remote_body_parse() {
        assert_eq!(
            RemoteBody::parse("{\"a\":1}".to_string()),
            RemoteBody::Json(json!({ "a": 1 }))
        );
        assert_eq!(
            RemoteBody::parse("<html>oops</html>".to_string()),
            RemoteBody::Text("<html>oops</html>".to_string())
        );
    }

    #[test]
    fn test_detail_message_fallbacks() {
        assert_eq!(detail_message(&json!({ "detail": "Job closed" })), "Job closed");
        assert_eq!(detail_message(&json!({ "detail": "" })), APPLY_FALLBACK_MESSAGE);
        assert_eq!(detail_message(&json!({ "detail": [1, 2] })), APPLY_FALLBACK_MESSAGE);
        assert_eq!(detail_message(&json!({})), APPLY_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_apply_sends_payload_and_returns_body() {
        let router = Router::new().route(
            "/applications/public/:job_id/apply",
            post(
                |Path(job_id): Path<String>, Json(body): Json<Value>| async move {
                    Json(json!({ "job": job_id, "echo": body }))
                },
            ),
        );
        let client = HrApiClient::new(spawn_stub(router).await);

        let value = client.apply("job-3", &payload()).await.unwrap();

        assert_eq!(value["job"], "job-3");
        assert_eq!(value["echo"]["full_name"], "Ada Lovelace");
        assert_eq!(value["echo"]["resume"], "https://files.example/1-cv.pdf");
    }

    #[tokio::test]
    async fn test_apply_rejection_uses_detail() {
        let client = apply_stub(StatusCode::BAD_REQUEST, r#"{"detail":"Job closed"}"#).await;
        let err = client.apply("job-1", &payload()).await.unwrap_err();
        assert!(matches!(err, ApplyError::Rejected { status: 400, .. }));
        assert_eq!(err.user_message(), "Job closed");
    }

    #[tokio::test]
    async fn test_apply_rejection_without_detail_uses_fallback() {
        let client = apply_stub(StatusCode::CONFLICT, r#"{"error":"dup"}"#).await;
        let err = client.apply("job-1", &payload()).await.unwrap_err();
        assert_eq!(err.user_message(), "Application failed");
    }

    #[tokio::test]
    async fn test_apply_non_json_is_malformed_even_on_success() {
        let client = apply_stub(StatusCode::OK, "thanks!").await;
        let err = client.apply("job-1", &payload()).await.unwrap_err();
        assert!(matches!(err, ApplyError::MalformedResponse { ref raw, .. } if raw == "thanks!"));
        assert_eq!(err.user_message(), "thanks!");
    }

    #[tokio::test]
    async fn test_apply_empty_body_falls_back_to_generic_message() {
        let client = apply_stub(StatusCode::BAD_GATEWAY, "").await;
        let err = client.apply("job-1", &payload()).await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_apply_network_failure() {
        let client = HrApiClient::new(closed_base_url().await);
        let err = client.apply("job-1", &payload()).await.unwrap_err();
        assert!(matches!(err, ApplyError::Network(_)));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_fetch_job_decodes_posting() {
        let router = Router::new().route(
            "/jobs/public/:job_id/",
            get(|Path(job_id): Path<String>| async move {
                Json(json!({ "job_id": job_id, "job_title": "Backend Engineer" }))
            }),
        );
        let client = HrApiClient::new(format!("{}/", spawn_stub(router).await));

        let job = client.fetch_job("j-42").await.unwrap();
        assert_eq!(job.job_id, "j-42");
        assert_eq!(job.job_title, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_fetch_job_reports_upstream_status() {
        let client = HrApiClient::new(spawn_stub(Router::new()).await);
        let err = client.fetch_job("missing").await.unwrap_err();
        assert!(matches!(err, JobFetchError::Status { status: 404 }));
    }
}
