use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::field::FormField;
use crate::error::CoreError;

/// A named, ordered collection of fields owned by one user.
///
/// Field order is display order and export column order. Field ids are
/// unique within `fields`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Form {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
    pub is_published: bool,
    /// Cached number of stored responses, bumped on every submission.
    #[serde(default)]
    pub response_count: u64,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Form {
    /// A fresh draft with no fields.
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
            is_published: false,
            response_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Append a field at the end of the form.
    pub fn add_field(&mut self, field: FormField) -> Result<(), CoreError> {
        if self.field(&field.id).is_some() {
            return Err(CoreError::DuplicateFieldId(field.id));
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn remove_field(&mut self, id: &str) -> Option<FormField> {
        let index = self.fields.iter().position(|f| f.id == id)?;
        Some(self.fields.remove(index))
    }

    /// Move the field at `from` so it ends up at position `to`.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.fields.len();
        for index in [from, to] {
            if index >= len {
                return Err(CoreError::FieldOutOfBounds { index, len });
            }
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        Ok(())
    }

    /// Replace the field with the same id, keeping its position.
    pub fn replace_field(&mut self, field: FormField) -> Result<(), CoreError> {
        let slot = self
            .fields
            .iter_mut()
            .find(|f| f.id == field.id)
            .ok_or_else(|| CoreError::FieldNotFound(field.id.clone()))?;
        *slot = field;
        Ok(())
    }

    /// Check that every field id is unique.
    pub fn check_fields(&self) -> Result<(), CoreError> {
        check_unique_ids(&self.fields)
    }

    /// Copy this form's content into a new unpublished draft with no
    /// responses.
    pub fn duplicate(&self, now: jiff::Timestamp) -> Form {
        let mut copy = Form::new(
            self.user_id.clone(),
            format!("{} (Copy)", self.title),
            self.description.clone(),
            now,
        );
        copy.fields = self.fields.clone();
        copy
    }
}

fn check_unique_ids(fields: &[FormField]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.id.as_str()) {
            return Err(CoreError::DuplicateFieldId(field.id.clone()));
        }
    }
    Ok(())
}

/// A partial update to a form. `None` leaves the current value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fields: Option<Vec<FormField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_published: Option<bool>,
}

impl FormUpdate {
    pub fn publish(is_published: bool) -> Self {
        Self {
            is_published: Some(is_published),
            ..Self::default()
        }
    }

    pub fn fields(fields: Vec<FormField>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::default()
        }
    }

    /// Apply the update in place and stamp `updated_at`. The form is left
    /// untouched if the new field list has duplicate ids.
    pub fn apply(self, form: &mut Form, now: jiff::Timestamp) -> Result<(), CoreError> {
        if let Some(fields) = &self.fields {
            check_unique_ids(fields)?;
        }
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(fields) = self.fields {
            form.fields = fields;
        }
        if let Some(is_published) = self.is_published {
            form.is_published = is_published;
        }
        form.updated_at = now;
        Ok(())
    }
}
