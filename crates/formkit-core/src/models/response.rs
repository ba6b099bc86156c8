use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::{AnswerValue, ResponseMap};

/// One submission to a form. Immutable once stored.
///
/// `responses` may hold ids of fields that were removed from the form after
/// the submission; readers look answers up by the current field ids and
/// ignore the rest.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub responses: ResponseMap,
    pub submitted_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub user_agent: Option<String>,
}

impl FormResponse {
    pub fn new(
        form_id: Uuid,
        responses: ResponseMap,
        metadata: Option<SubmissionMetadata>,
        now: jiff::Timestamp,
    ) -> Self {
        let metadata = metadata.unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            form_id,
            responses,
            submitted_at: now,
            ip_address: metadata.ip_address,
            user_agent: metadata.user_agent,
        }
    }

    /// The answer for a field, treating blank answers as absent.
    pub fn answer(&self, field_id: &str) -> Option<&AnswerValue> {
        self.responses.get(field_id).filter(|v| !v.is_blank())
    }
}

/// Request metadata recorded with a submission for audit purposes only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub user_agent: Option<String>,
}
