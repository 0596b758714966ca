use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Fields of the candidate form. Serialized with the form's own (camelCase) names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    PhoneNumber,
    Resume,
    CoverLetter,
}

impl FormField {
    /// Fields that must be present and error-free before submission.
    pub const REQUIRED: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::PhoneNumber,
        FormField::Resume,
    ];

    /// Fields collected on the contact-info step.
    pub const CONTACT: [FormField; 3] =
        [FormField::FullName, FormField::Email, FormField::PhoneNumber];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "fullName" => Some(FormField::FullName),
            "email" => Some(FormField::Email),
            "phoneNumber" => Some(FormField::PhoneNumber),
            "resume" => Some(FormField::Resume),
            "coverLetter" => Some(FormField::CoverLetter),
            _ => None,
        }
    }
}

/// A resume attached to the form, held in memory until upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    /// Content type as declared by the client, e.g. `application/pdf`.
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// A candidate value for one field: text for the text inputs, an optional file for the resume.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File(Option<ResumeFile>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::File(_) => None,
        }
    }

    /// The text content, or an empty string for a file value.
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::File(_) => String::new(),
        }
    }
}
