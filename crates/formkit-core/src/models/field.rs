use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The kind of question a field asks. The serialized tag is the wire name
/// (`"text"`, `"textarea"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Number,
    Select,
    Radio,
    Checkbox,
    Date,
    File,
    Url,
    Phone,
    Rating,
    Scale,
    Matrix,
    Section,
}

impl FieldType {
    /// Every supported variant, in builder palette order.
    pub const ALL: [FieldType; 15] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Number,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::File,
        FieldType::Url,
        FieldType::Phone,
        FieldType::Rating,
        FieldType::Scale,
        FieldType::Matrix,
        FieldType::Section,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Url => "url",
            FieldType::Phone => "phone",
            FieldType::Rating => "rating",
            FieldType::Scale => "scale",
            FieldType::Matrix => "matrix",
            FieldType::Section => "section",
        }
    }

    /// Name shown in the builder palette.
    pub fn display_name(self) -> &'static str {
        match self {
            FieldType::Text => "Short Text",
            FieldType::Textarea => "Long Text",
            FieldType::Email => "Email",
            FieldType::Number => "Number",
            FieldType::Select => "Dropdown",
            FieldType::Radio => "Multiple Choice",
            FieldType::Checkbox => "Checkboxes",
            FieldType::Date => "Date",
            FieldType::File => "File Upload",
            FieldType::Url => "Website",
            FieldType::Phone => "Phone",
            FieldType::Rating => "Rating",
            FieldType::Scale => "Linear Scale",
            FieldType::Matrix => "Matrix",
            FieldType::Section => "Section",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FieldType::Text => "Single line text input",
            FieldType::Textarea => "Multi-line text area",
            FieldType::Email => "Email address input",
            FieldType::Number => "Numeric input field",
            FieldType::Select => "Single choice dropdown",
            FieldType::Radio => "Radio button selection",
            FieldType::Checkbox => "Multiple selections",
            FieldType::Date => "Date picker input",
            FieldType::File => "File attachment field",
            FieldType::Url => "Web address input",
            FieldType::Phone => "Phone number input",
            FieldType::Rating => "Star rating",
            FieldType::Scale => "Numbered scale between two labels",
            FieldType::Matrix => "Grid of rows and columns",
            FieldType::Section => "Heading that groups the questions below it",
        }
    }

    /// Variants whose field carries an `options` sequence.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox | FieldType::Matrix
        )
    }

    /// Variants answered with a sequence of strings.
    pub fn is_multi_value(self) -> bool {
        matches!(self, FieldType::Checkbox | FieldType::Matrix)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| CoreError::UnsupportedFieldType(tag.to_string()))
    }
}

/// Variant-specific configuration. Only rating, scale and matrix fields
/// carry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldSettings {
    Rating {
        max: u32,
    },
    Scale {
        min: i32,
        max: i32,
        min_label: String,
        max_label: String,
    },
    Matrix {
        columns: Vec<String>,
    },
}

impl FieldSettings {
    /// The field variant these settings belong to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldSettings::Rating { .. } => FieldType::Rating,
            FieldSettings::Scale { .. } => FieldType::Scale,
            FieldSettings::Matrix { .. } => FieldType::Matrix,
        }
    }
}

/// One question definition within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Declared choices. Present for select, radio, checkbox and matrix rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub settings: Option<FieldSettings>,
}

impl FormField {
    /// A bare field with no hints, options or settings.
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            options: None,
            placeholder: None,
            description: None,
            settings: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `value` is one of the declared options. Fields without
    /// declared options accept nothing.
    pub fn has_option(&self, value: &str) -> bool {
        self.options
            .as_deref()
            .is_some_and(|options| options.iter().any(|o| o == value))
    }
}
