use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use formkit_core::models::FieldType;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormAnalytics {
    pub form_id: Uuid,
    pub total_responses: usize,
    /// One entry per field, in form order.
    pub field_analytics: Vec<FieldAnalytic>,
}

impl FormAnalytics {
    pub fn field(&self, field_id: &str) -> Option<&FieldAnalytic> {
        self.field_analytics.iter().find(|a| a.field_id == field_id)
    }
}

/// Statistics for a single field. The optional blocks are only present for
/// the variants they apply to, and the numeric block only when at least one
/// answer parsed as a number.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldAnalytic {
    pub field_id: String,
    pub field_label: String,
    pub field_type: FieldType,
    pub response_count: usize,
    /// Percentage of all responses that answered this field (0 to 100).
    pub response_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub option_counts: Option<Vec<OptionCount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub average_length: Option<f64>,
}

impl FieldAnalytic {
    /// Count recorded for a declared option.
    pub fn option_count(&self, option: &str) -> Option<usize> {
        self.option_counts
            .as_ref()?
            .iter()
            .find(|c| c.option == option)
            .map(|c| c.count)
    }
}

/// How many responses picked a declared option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionCount {
    pub option: String,
    pub count: usize,
}
