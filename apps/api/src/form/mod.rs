// Candidate intake form: field validation, per-session state, and the
// upload-then-apply submission coordinator.
// Network collaborators are reached only through `ResumeUploader` and `ApplicationSubmitter`.

pub mod coordinator;
pub mod fields;
pub mod job_details;
pub mod notify;
pub mod state;
pub mod validation;

pub use coordinator::{SubmissionCoordinator, SubmissionPhase, SubmitOutcome};
pub use fields::{FieldValue, FormField};
pub use job_details::load_job_details;
pub use notify::{Notification, NotificationLog};
pub use state::{FormState, FormStep};
