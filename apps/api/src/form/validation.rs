use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::form::fields::{FieldValue, FormField, ResumeFile};
use crate::form::state::ApplicantForm;

pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const COVER_LETTER_RECOMMENDED_MIN_WORDS: usize = 300;
pub const COVER_LETTER_MAX_WORDS: usize = 500;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"));

/// Per-field error messages. A field missing from the map has no error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    /// Stores `error` for `field`, or clears the field when `None`.
    pub fn set(&mut self, field: FormField, error: Option<String>) {
        match error {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn has_error(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validates a single field value. Pure; returns the user-facing message on failure.
pub fn validate_field(field: FormField, value: &FieldValue) -> Option<String> {
    match field {
        FormField::FullName => match value.as_text() {
            Some(name) if name.trim().chars().count() >= 2 => None,
            _ => Some("Full name must be at least 2 characters".to_string()),
        },
        FormField::Email => match value.as_text() {
            None | Some("") => Some("Email is required".to_string()),
            Some(email) if !EMAIL_RE.is_match(email) => {
                Some("Please enter a valid email address".to_string())
            }
            Some(_) => None,
        },
        FormField::PhoneNumber => match value.as_text() {
            None | Some("") => Some("Phone number is required".to_string()),
            Some(phone) if !PHONE_RE.is_match(phone) => {
                Some("Please enter a valid phone number with country code".to_string())
            }
            Some(_) => None,
        },
        FormField::Resume => match value {
            FieldValue::File(Some(file)) => validate_resume(file),
            _ => Some("Resume is required".to_string()),
        },
        FormField::CoverLetter => None,
    }
}

fn validate_resume(file: &ResumeFile) -> Option<String> {
    if file.size() > MAX_RESUME_BYTES {
        return Some("File size must be less than 10MB".to_string());
    }
    if !ALLOWED_RESUME_TYPES.contains(&file.content_type.as_str()) {
        return Some("Only PDF and DOCX files are allowed".to_string());
    }
    None
}

/// Re-runs every required-field validator against the whole form.
pub fn validate_form(form: &ApplicantForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in FormField::REQUIRED {
        errors.set(field, validate_field(field, &form.value(field)));
    }
    errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverLetterAdvice {
    Empty,
    BelowRecommended,
    WithinRecommended,
    OverSoftCap,
}

/// Advisory word count for the cover letter. Never blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverLetterReport {
    pub word_count: usize,
    pub max_words: usize,
    pub advice: CoverLetterAdvice,
}

pub fn cover_letter_report(text: &str) -> CoverLetterReport {
    let word_count = text.split_whitespace().count();
    let advice = match word_count {
        0 => CoverLetterAdvice::Empty,
        n if n < COVER_LETTER_RECOMMENDED_MIN_WORDS => CoverLetterAdvice::BelowRecommended,
        n if n <= COVER_LETTER_MAX_WORDS => CoverLetterAdvice::WithinRecommended,
        _ => CoverLetterAdvice::OverSoftCap,
    };
    CoverLetterReport {
        word_count,
        max_words: COVER_LETTER_MAX_WORDS,
        advice,
    }
}
