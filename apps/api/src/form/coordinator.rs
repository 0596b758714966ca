//! Submission coordinator: validate, upload the resume, then apply.
//!
//! The two network calls are strictly ordered. Every failure is caught here,
//! turned into one notification, and the form drops back to editable.
//! A resume uploaded before a failed apply is left in storage.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::form::notify::{Notification, Notifier};
use crate::form::state::{ApplicantForm, FormState};
use crate::form::validation::{validate_form, ValidationErrors};
use crate::hr_client::{ApplicationSubmitter, ApplyError};
use crate::models::application::ApplicationPayload;
use crate::storage::{ResumeUploader, UploadError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Uploading,
    Applying,
    Succeeded,
    Failed(String),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The remote API accepted the application; carries its response body.
    Succeeded(Value),
    /// Whole-form validation failed; nothing was sent.
    Rejected(ValidationErrors),
    /// Upload or apply failed; carries the message shown to the candidate.
    Failed(String),
    /// Another submission is already in flight on this coordinator.
    Busy,
    /// The form was already submitted and has not been reset.
    AlreadySubmitted,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("resume upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("application submit failed: {0}")]
    Apply(#[from] ApplyError),
}

impl SubmissionError {
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Upload(e) => e.reason.clone(),
            SubmissionError::Apply(e) => e.user_message(),
        }
    }
}

/// Clears the busy flag when the in-flight submission ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SubmissionCoordinator {
    uploader: Arc<dyn ResumeUploader>,
    submitter: Arc<dyn ApplicationSubmitter>,
    notifier: Arc<dyn Notifier>,
    busy: AtomicBool,
    phase: Mutex<SubmissionPhase>,
}

impl SubmissionCoordinator {
    pub fn new(
        uploader: Arc<dyn ResumeUploader>,
        submitter: Arc<dyn ApplicationSubmitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            uploader,
            submitter,
            notifier,
            busy: AtomicBool::new(false),
            phase: Mutex::new(SubmissionPhase::Idle),
        }
    }

    // Reserved for callers sharing one coordinator across requests
    #[allow(dead_code)]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
            .lock()
            .map(|p| p.clone())
            .unwrap_or(SubmissionPhase::Idle)
    }

    fn set_phase(&self, phase: SubmissionPhase) {
        if let Ok(mut current) = self.phase.lock() {
            *current = phase;
        }
    }

    /// Runs one submission for `job_id`. Never returns an error: failures are
    /// reported through the notifier and the outcome.
    pub async fn submit(&self, job_id: &str, form: &mut FormState) -> SubmitOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            warn!("Submission for job {job_id} refused: another submission is in flight");
            return SubmitOutcome::Busy;
        };

        if form.is_submitted() {
            return SubmitOutcome::AlreadySubmitted;
        }

        let errors = validate_form(form.form());
        if !errors.is_empty() {
            form.replace_errors(errors.clone());
            self.notifier.notify(Notification::error(
                "Validation Error",
                "Please fix the errors before submitting.",
            ));
            return SubmitOutcome::Rejected(errors);
        }
        form.replace_errors(errors);

        form.begin_submit();
        let result = self.upload_then_apply(job_id, form.form()).await;

        match result {
            Ok(application) => {
                form.finish_submit(true);
                self.set_phase(SubmissionPhase::Succeeded);
                info!("Application for job {job_id} submitted");
                self.notifier.notify(Notification::success(
                    "Application Submitted 🎉",
                    "Thank you for applying! Our team will contact you soon.",
                ));
                SubmitOutcome::Succeeded(application)
            }
            Err(e) => {
                let message = e.user_message();
                warn!("Submission for job {job_id} failed: {e}");
                self.set_phase(SubmissionPhase::Failed(message.clone()));
                self.notifier
                    .notify(Notification::error("Submission Failed", message.clone()));
                form.finish_submit(false);
                self.set_phase(SubmissionPhase::Idle);
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn upload_then_apply(
        &self,
        job_id: &str,
        form: &ApplicantForm,
    ) -> Result<Value, SubmissionError> {
        let resume_url = match &form.resume {
            Some(file) => {
                self.set_phase(SubmissionPhase::Uploading);
                Some(self.uploader.upload(file).await?)
            }
            None => None,
        };

        self.set_phase(SubmissionPhase::Applying);
        let payload = ApplicationPayload::from_form(form, resume_url);
        Ok(self.submitter.submit(job_id, &payload).await?)
    }

    /// Starts a new application after a successful one.
    // Reserved for long-lived sessions; the HTTP route is single-shot
    #[allow(dead_code)]
    pub fn reset(&self, form: &mut FormState) {
        form.reset();
        self.set_phase(SubmissionPhase::Idle);
    }
}
