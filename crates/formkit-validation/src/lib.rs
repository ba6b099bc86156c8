//! formkit-validation
//!
//! Checks a submitted response map against a form's fields. Pure: no I/O,
//! no shared state. Errors come back as data in field order, at most one
//! per field, so the UI can scroll to the first one.

pub mod error;
pub mod rules;

use formkit_core::models::{FormField, ResponseMap};

pub use error::{ValidationError, ValidationErrorKind};

/// Validate `responses` against `fields`.
///
/// A required field with a blank or absent answer fails with
/// [`ValidationErrorKind::Required`] and gets no further checks. A blank
/// optional answer is accepted without a type check. Answers keyed by ids
/// that are not in `fields` are ignored.
pub fn validate_response(fields: &[FormField], responses: &ResponseMap) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for field in fields {
        let value = responses.get(&field.id).filter(|v| !v.is_blank());

        let Some(value) = value else {
            if field.required {
                let error = ValidationError::new(&field.id, ValidationErrorKind::Required);
                errors.push(error);
            }
            continue;
        };

        if let Some(kind) = rules::check(field, value) {
            errors.push(ValidationError::new(&field.id, kind));
        }
    }

    errors
}
