//! S3 key/path conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the canonical
//! layout of objects in the formkit bucket.

use uuid::Uuid;

pub const FORMS_PREFIX: &str = "forms/";

pub fn form(id: Uuid) -> String {
    format!("forms/{id}.json")
}

pub fn responses_prefix(form_id: Uuid) -> String {
    format!("responses/{form_id}/")
}

pub fn response(form_id: Uuid, id: Uuid) -> String {
    format!("responses/{form_id}/{id}.json")
}
