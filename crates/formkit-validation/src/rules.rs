use std::sync::LazyLock;

use regex::Regex;

use formkit_core::models::{AnswerValue, FieldType, FormField};

use crate::error::ValidationErrorKind;

/// local@domain.tld with no whitespace and a single `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// Run the type-specific rule for a non-blank answer. Variants without a
/// rule accept anything.
pub fn check(field: &FormField, value: &AnswerValue) -> Option<ValidationErrorKind> {
    let failed = |ok: bool, kind: ValidationErrorKind| (!ok).then_some(kind);

    match field.field_type {
        FieldType::Email => failed(
            value.as_text().is_some_and(is_valid_email),
            ValidationErrorKind::InvalidEmail,
        ),
        FieldType::Number => failed(
            value.as_number().is_some(),
            ValidationErrorKind::InvalidNumber,
        ),
        FieldType::Select | FieldType::Radio => failed(
            field.options.is_none() || value.as_text().is_some_and(|v| field.has_option(v)),
            ValidationErrorKind::InvalidOption,
        ),
        FieldType::Checkbox => failed(
            value.as_list().is_some_and(|selected| {
                field.options.is_none() || selected.iter().all(|v| field.has_option(v))
            }),
            ValidationErrorKind::InvalidOptions,
        ),
        FieldType::Date => failed(
            value.as_text().is_some_and(is_valid_date),
            ValidationErrorKind::InvalidDate,
        ),
        FieldType::File => failed(value.as_file().is_some(), ValidationErrorKind::InvalidFile),
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Url
        | FieldType::Phone
        | FieldType::Rating
        | FieldType::Scale
        | FieldType::Matrix
        | FieldType::Section => None,
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Accepts a calendar date (`2024-02-29`), a civil date-time
/// (`2024-02-29T10:30`) or an RFC 3339 timestamp.
pub fn is_valid_date(value: &str) -> bool {
    let value = value.trim();
    value.parse::<jiff::civil::Date>().is_ok()
        || value.parse::<jiff::civil::DateTime>().is_ok()
        || value.parse::<jiff::Timestamp>().is_ok()
}
