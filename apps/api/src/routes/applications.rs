//! A complete form session over HTTP: every field is entered, the contact
//! step is advanced, and the coordinator submits.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::validation::{cover_letter_report, CoverLetterReport, ValidationErrors};
use crate::form::{
    load_job_details, FieldValue, FormField, FormState, FormStep, Notification, NotificationLog,
    SubmissionCoordinator, SubmissionPhase, SubmitOutcome,
};
use crate::routes::read_file_part;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The contact step could not be completed.
    Incomplete,
    Rejected,
    Failed,
    Busy,
    AlreadySubmitted,
    Succeeded,
}

impl SessionStatus {
    fn http_status(self) -> StatusCode {
        match self {
            SessionStatus::Succeeded => StatusCode::CREATED,
            SessionStatus::Incomplete | SessionStatus::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
            SessionStatus::Failed => StatusCode::BAD_GATEWAY,
            SessionStatus::Busy | SessionStatus::AlreadySubmitted => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub job_id: String,
    pub job_title: Option<String>,
    pub job_summary: Option<String>,
    pub step: FormStep,
    pub step_number: u8,
    pub status: SessionStatus,
    pub phase: SubmissionPhase,
    pub errors: ValidationErrors,
    pub notifications: Vec<Notification>,
    pub cover_letter: CoverLetterReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Value>,
}

/// Reads the multipart form into field values. Unknown parts are ignored.
async fn read_form_parts(
    multipart: &mut Multipart,
) -> Result<HashMap<FormField, FieldValue>, AppError> {
    let mut values = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let Some(name) = field.name().and_then(FormField::parse) else {
            continue;
        };
        let value = match name {
            FormField::Resume => FieldValue::File(read_file_part(field).await?),
            _ => FieldValue::Text(
                field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?,
            ),
        };
        values.insert(name, value);
    }
    Ok(values)
}

/// POST /api/v1/jobs/:job_id/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session_id = Uuid::new_v4();
    info!("Form session {session_id} started for job {job_id}");

    let notifications = Arc::new(NotificationLog::new());
    let job = load_job_details(&state.hr_api, &job_id, notifications.as_ref()).await;

    let mut values = read_form_parts(&mut multipart).await?;
    let mut form = FormState::new();
    for field in FormField::CONTACT {
        form.set_field(field, values.remove(&field).unwrap_or(FieldValue::text("")));
    }

    let coordinator = SubmissionCoordinator::new(
        state.resume_store.clone(),
        Arc::new(state.hr_api.clone()),
        notifications.clone(),
    );

    let (status, message, application) = if form.set_step(FormStep::Documents) {
        form.set_field(
            FormField::Resume,
            values.remove(&FormField::Resume).unwrap_or(FieldValue::File(None)),
        );
        form.set_field(
            FormField::CoverLetter,
            values
                .remove(&FormField::CoverLetter)
                .unwrap_or(FieldValue::text("")),
        );
        match coordinator.submit(&job_id, &mut form).await {
            SubmitOutcome::Succeeded(body) => (SessionStatus::Succeeded, None, Some(body)),
            SubmitOutcome::Rejected(errors) => (
                SessionStatus::Rejected,
                Some(format!("{} field(s) need attention", errors.len())),
                None,
            ),
            SubmitOutcome::Failed(message) => (SessionStatus::Failed, Some(message), None),
            SubmitOutcome::Busy => (SessionStatus::Busy, None, None),
            SubmitOutcome::AlreadySubmitted => (SessionStatus::AlreadySubmitted, None, None),
        }
    } else {
        (SessionStatus::Incomplete, None, None)
    };

    info!("Form session {session_id} for job {job_id} ended: {status:?}");

    let response = SessionResponse {
        session_id,
        job_id,
        job_title: job.as_ref().map(|j| j.job_title.clone()),
        job_summary: job.as_ref().map(|j| j.summary_line()),
        step: form.step(),
        step_number: form.step().number(),
        status,
        phase: coordinator.phase(),
        errors: form.errors().clone(),
        notifications: notifications.entries(),
        cover_letter: cover_letter_report(&form.form().cover_letter),
        message,
        application,
    };

    Ok((status.http_status(), Json(response)))
}
