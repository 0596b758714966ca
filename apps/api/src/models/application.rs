use serde::{Deserialize, Serialize};

use crate::form::state::ApplicantForm;

/// Body of the remote apply call, in the HR API's field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationPayload {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    /// Public URL of the uploaded resume; serialized as `null` when absent.
    pub resume: Option<String>,
    pub cover_letter: String,
}

impl ApplicationPayload {
    pub fn from_form(form: &ApplicantForm, resume_url: Option<String>) -> Self {
        Self {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone_number: form.phone_number.clone(),
            resume: resume_url,
            cover_letter: form.cover_letter.clone(),
        }
    }
}
