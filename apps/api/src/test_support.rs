//! Helpers shared by unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};

use crate::form::fields::ResumeFile;
use crate::storage::{storage_key, ResumeUploader, UploadError};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub(crate) async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub(crate) async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}")
}

/// One part of a hand-built multipart body.
pub(crate) struct Part {
    name: String,
    file: Option<(String, String)>,
    body: Vec<u8>,
}

impl Part {
    pub(crate) fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file: None,
            body: value.as_bytes().to_vec(),
        }
    }

    pub(crate) fn file(name: &str, file_name: &str, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            file: Some((file_name.to_string(), content_type.to_string())),
            body,
        }
    }
}

const BOUNDARY: &str = "careers-test-boundary";

/// Builds a `multipart/form-data` POST request to `uri`.
pub(crate) fn multipart_request(uri: &str, parts: &[Part]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match &part.file {
            Some((file_name, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    part.name, file_name, content_type
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(&part.body);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("multipart request")
}

/// In-memory resume store. URLs are `https://files.example/<n>-<file name>`,
/// counting uploads from 1.
pub(crate) struct MemoryResumeStore {
    uploads: Mutex<Vec<ResumeFile>>,
    failure: Option<String>,
}

impl MemoryResumeStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
            failure: None,
        })
    }

    pub(crate) fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
            failure: Some(reason.to_string()),
        })
    }

    pub(crate) fn uploads(&self) -> Vec<ResumeFile> {
        self.uploads.lock().expect("uploads lock").clone()
    }
}

#[async_trait]
impl ResumeUploader for MemoryResumeStore {
    async fn upload(&self, file: &ResumeFile) -> Result<String, UploadError> {
        if let Some(reason) = &self.failure {
            return Err(UploadError::new(reason.clone()));
        }
        let mut uploads = self.uploads.lock().expect("uploads lock");
        uploads.push(file.clone());
        let key = storage_key(uploads.len() as i64, &file.file_name);
        Ok(format!("https://files.example/{key}"))
    }
}
