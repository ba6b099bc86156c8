use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Which rule a response failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationErrorKind {
    Required,
    InvalidEmail,
    InvalidNumber,
    InvalidOption,
    InvalidOptions,
    InvalidDate,
    InvalidFile,
}

impl ValidationErrorKind {
    /// The message shown inline next to the offending field.
    pub fn message(self) -> &'static str {
        match self {
            ValidationErrorKind::Required => "This field is required",
            ValidationErrorKind::InvalidEmail => "Please enter a valid email address",
            ValidationErrorKind::InvalidNumber => "Please enter a valid number",
            ValidationErrorKind::InvalidOption => "Please select a valid option",
            ValidationErrorKind::InvalidOptions => "Please select valid options",
            ValidationErrorKind::InvalidDate => "Please enter a valid date",
            ValidationErrorKind::InvalidFile => "Please select a valid file",
        }
    }
}

/// A user-correctable problem with one field of a submitted response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{field_id}: {message}")]
pub struct ValidationError {
    pub field_id: String,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field_id: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_id: field_id.into(),
            kind,
            message: kind.message().to_string(),
        }
    }
}
