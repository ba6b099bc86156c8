use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::form::Form;
use super::response::FormResponse;

pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;

/// Summary numbers for a user's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub total_forms: usize,
    pub total_responses: u64,
    pub published_forms: usize,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub form_id: Uuid,
    pub message: String,
    pub timestamp: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ActivityKind {
    FormCreated,
    ResponseReceived,
}

impl DashboardStats {
    /// Derive stats from a user's forms and the responses to those forms.
    ///
    /// Totals come from each form's cached `response_count`. Activity is
    /// newest first and capped at `limit` entries; responses whose form is
    /// not in `forms` are skipped.
    pub fn collect(forms: &[Form], responses: &[FormResponse], limit: usize) -> Self {
        let mut recent_activity: Vec<ActivityEntry> = forms
            .iter()
            .map(|form| ActivityEntry {
                kind: ActivityKind::FormCreated,
                form_id: form.id,
                message: format!("Form \"{}\" created", form.title),
                timestamp: form.created_at,
            })
            .collect();

        for response in responses {
            let Some(form) = forms.iter().find(|f| f.id == response.form_id) else {
                continue;
            };
            recent_activity.push(ActivityEntry {
                kind: ActivityKind::ResponseReceived,
                form_id: form.id,
                message: format!("New response to \"{}\"", form.title),
                timestamp: response.submitted_at,
            });
        }

        recent_activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent_activity.truncate(limit);

        Self {
            total_forms: forms.len(),
            total_responses: forms.iter().map(|f| f.response_count).sum(),
            published_forms: forms.iter().filter(|f| f.is_published).count(),
            recent_activity,
        }
    }
}
