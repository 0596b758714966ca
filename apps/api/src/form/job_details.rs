use tracing::warn;

use crate::form::notify::{Notification, Notifier};
use crate::hr_client::HrApiClient;
use crate::models::job::JobPosting;

/// Loads the posting shown above the form. A failure is non-blocking: the
/// candidate is told, and the form stays usable without job context.
pub async fn load_job_details(
    client: &HrApiClient,
    job_id: &str,
    notifier: &dyn Notifier,
) -> Option<JobPosting> {
    match client.fetch_job(job_id).await {
        Ok(job) => Some(job),
        Err(e) => {
            warn!("Failed to load job details for {job_id}: {e}");
            notifier.notify(Notification::error(
                "Failed to load job details",
                "Please try again later.",
            ));
            None
        }
    }
}
