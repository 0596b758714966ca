use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};

use crate::config::StorageConfig;
use crate::form::fields::ResumeFile;

const UPLOAD_FAILED: &str = "File upload failed";

#[derive(Debug, Error)]
#[error("{reason}")]
pub struct UploadError {
    pub reason: String,
}

impl UploadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Stores a resume and returns a publicly resolvable URL for it.
#[async_trait]
pub trait ResumeUploader: Send + Sync {
    async fn upload(&self, file: &ResumeFile) -> Result<String, UploadError>;
}

/// Object key for an upload: millisecond timestamp, dash, uploaded file name.
pub fn storage_key(timestamp_millis: i64, file_name: &str) -> String {
    format!("{timestamp_millis}-{file_name}")
}

/// Resume store backed by a Cloudflare R2 bucket through the S3 API.
#[derive(Clone)]
pub struct R2ResumeStore {
    s3: aws_sdk_s3::Client,
    config: StorageConfig,
}

impl R2ResumeStore {
    pub fn new(s3: aws_sdk_s3::Client, config: &StorageConfig) -> Self {
        Self {
            s3,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ResumeUploader for R2ResumeStore {
    async fn upload(&self, file: &ResumeFile) -> Result<String, UploadError> {
        let key = storage_key(Utc::now().timestamp_millis(), &file.file_name);

        self.s3
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(ByteStream::from(file.bytes.clone()))
            .content_type(&file.content_type)
            .send()
            .await
            .map_err(|e| {
                error!("R2 upload of {key} failed: {e:?}");
                UploadError::new(UPLOAD_FAILED)
            })?;

        info!(
            "Uploaded resume to r2://{}/{} ({} bytes)",
            self.config.bucket,
            key,
            file.size()
        );

        Ok(self.config.public_url(&key))
    }
}

/// Builds an S3 client pointed at the account's R2 endpoint.
pub async fn build_s3_client(config: &StorageConfig) -> aws_sdk_s3::Client {
    let credentials = aws_sdk_s3::config::Credentials::new(
        &config.access_key,
        &config.secret_key,
        None,
        None,
        "careers-r2-static",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("auto"))
        .credentials_provider(credentials)
        .endpoint_url(config.endpoint())
        .load()
        .await;

    aws_sdk_s3::Client::new(&sdk_config)
}
