use std::sync::Arc;

use crate::hr_client::HrApiClient;
use crate::storage::ResumeUploader;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub hr_api: HrApiClient,
    /// Pluggable resume store. R2 in production, in-memory in tests.
    pub resume_store: Arc<dyn ResumeUploader>,
}
