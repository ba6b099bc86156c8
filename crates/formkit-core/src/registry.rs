//! Field type registry.
//!
//! Produces a ready-to-edit field for each supported variant: a fresh id,
//! a non-empty label and placeholder, default options for choice variants
//! and default settings for rating, scale and matrix.

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::field::{FieldSettings, FieldType, FormField};

const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

/// Build a default field for a wire tag such as `"email"`.
pub fn default_field(tag: &str) -> Result<FormField, CoreError> {
    let field_type: FieldType = tag.parse()?;
    Ok(new_field(field_type))
}

/// Build a default field of the given variant.
pub fn new_field(field_type: FieldType) -> FormField {
    let id = Uuid::new_v4().to_string();

    let (label, placeholder) = match field_type {
        FieldType::Text => ("Short Text Question", "Enter your answer"),
        FieldType::Textarea => ("Long Text Question", "Enter your detailed answer"),
        FieldType::Email => ("Email Address", "Enter your email"),
        FieldType::Number => ("Number Question", "Enter a number"),
        FieldType::Select => ("Dropdown Question", "Select an option"),
        FieldType::Radio => ("Multiple Choice Question", "Choose one option"),
        FieldType::Checkbox => ("Checkbox Question", "Choose all that apply"),
        FieldType::Date => ("Date Question", "Pick a date"),
        FieldType::File => ("File Upload Question", "Choose a file"),
        FieldType::Url => ("Website URL", "https://example.com"),
        FieldType::Phone => ("Phone Number", "Enter your phone number"),
        FieldType::Rating => ("Rating Question", "Rate from 1 to 5"),
        FieldType::Scale => ("Scale Question", "Pick a value on the scale"),
        FieldType::Matrix => ("Matrix Question", "Choose one column per row"),
        FieldType::Section => ("Section Title", "Section"),
    };

    let mut field = FormField::new(id, field_type, label);
    field.placeholder = Some(placeholder.to_string());

    match field_type {
        FieldType::Select | FieldType::Radio | FieldType::Checkbox => {
            field.options = Some(DEFAULT_OPTIONS.map(String::from).to_vec());
        }
        FieldType::Rating => {
            field.settings = Some(FieldSettings::Rating { max: 5 });
        }
        FieldType::Scale => {
            field.settings = Some(FieldSettings::Scale {
                min: 1,
                max: 10,
                min_label: "Not likely".to_string(),
                max_label: "Very likely".to_string(),
            });
        }
        FieldType::Matrix => {
            field.options = Some(vec![
                "Row 1".to_string(),
                "Row 2".to_string(),
                "Row 3".to_string(),
            ]);
            field.settings = Some(FieldSettings::Matrix {
                columns: vec![
                    "Column 1".to_string(),
                    "Column 2".to_string(),
                    "Column 3".to_string(),
                ],
            });
        }
        FieldType::Section => {
            field.description = Some("Describe what this section covers".to_string());
        }
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Email
        | FieldType::Number
        | FieldType::Date
        | FieldType::File
        | FieldType::Url
        | FieldType::Phone => {}
    }

    field
}
