use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Answers supplied by one submitter, keyed by field id.
pub type ResponseMap = BTreeMap<String, AnswerValue>;

/// A single answer. The shape depends on the field type: text-like fields
/// answer with a string, choice fields with one option string, checkbox and
/// matrix fields with a sequence, file fields with an attachment handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Null,
    Number(f64),
    Text(String),
    List(Vec<String>),
    File(FileRef),
}

impl AnswerValue {
    /// Null, the empty string and the empty sequence all mean "not answered".
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Text(s) => s.is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            AnswerValue::Number(_) | AnswerValue::File(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileRef> {
        match self {
            AnswerValue::File(file) => Some(file),
            _ => None,
        }
    }

    /// The answer read as a finite number: either a JSON number or a numeric
    /// string (surrounding whitespace ignored).
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            AnswerValue::Number(n) => *n,
            AnswerValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::List(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<FileRef> for AnswerValue {
    fn from(file: FileRef) -> Self {
        AnswerValue::File(file)
    }
}

/// Handle to an uploaded attachment. The bytes live elsewhere; `key` points
/// at them when the upload has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub key: Option<String>,
}

impl FileRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            content_type: None,
            key: None,
        }
    }
}
