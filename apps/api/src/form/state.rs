use serde::Serialize;

use crate::form::fields::{FieldValue, FormField, ResumeFile};
use crate::form::validation::{validate_field, ValidationErrors};

/// The in-progress candidate data for one form session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub resume: Option<ResumeFile>,
    pub cover_letter: String,
}

impl ApplicantForm {
    pub fn value(&self, field: FormField) -> FieldValue {
        match field {
            FormField::FullName => FieldValue::Text(self.full_name.clone()),
            FormField::Email => FieldValue::Text(self.email.clone()),
            FormField::PhoneNumber => FieldValue::Text(self.phone_number.clone()),
            FormField::CoverLetter => FieldValue::Text(self.cover_letter.clone()),
            FormField::Resume => FieldValue::File(self.resume.clone()),
        }
    }

    // A value of the wrong shape blanks the field; its validator reports the error.
    fn assign(&mut self, field: FormField, value: FieldValue) {
        match field {
            FormField::Resume => {
                self.resume = match value {
                    FieldValue::File(file) => file,
                    FieldValue::Text(_) => None,
                }
            }
            FormField::FullName => self.full_name = value.into_text(),
            FormField::Email => self.email = value.into_text(),
            FormField::PhoneNumber => self.phone_number = value.into_text(),
            FormField::CoverLetter => self.cover_letter = value.into_text(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    #[default]
    ContactInfo,
    Documents,
}

impl FormStep {
    pub fn number(self) -> u8 {
        match self {
            FormStep::ContactInfo => 1,
            FormStep::Documents => 2,
        }
    }
}

/// Per-session form store. Owns the applicant data, its errors, and the
/// submission flags; the coordinator is the only other writer.
#[derive(Debug, Default)]
pub struct FormState {
    step: FormStep,
    form: ApplicantForm,
    errors: ValidationErrors,
    submitting: bool,
    submitted: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn form(&self) -> &ApplicantForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[allow(dead_code)]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Replaces one field and revalidates only that field.
    /// Ignored once the application has been submitted; returns whether it applied.
    pub fn set_field(&mut self, field: FormField, value: FieldValue) -> bool {
        if self.submitted {
            return false;
        }
        let error = validate_field(field, &value);
        self.form.assign(field, value);
        self.errors.set(field, error);
        true
    }

    /// Moves between steps. Going back is always allowed; going forward needs
    /// every contact field filled in and free of stored errors.
    pub fn set_step(&mut self, step: FormStep) -> bool {
        if step == FormStep::Documents && self.step() == FormStep::ContactInfo && !self.can_advance()
        {
            return false;
        }
        self.step = step;
        true
    }

    pub fn can_advance(&self) -> bool {
        FormField::CONTACT.iter().all(|&field| {
            let filled = self
                .form
                .value(field)
                .as_text()
                .is_some_and(|v| !v.trim().is_empty());
            filled && !self.errors.has_error(field)
        })
    }

    /// Blank form, no errors, back on the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn replace_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        self.submitted = succeeded;
    }
}
