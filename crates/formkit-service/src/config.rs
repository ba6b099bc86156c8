use serde::{Deserialize, Serialize};

use formkit_core::models::dashboard::DEFAULT_RECENT_ACTIVITY_LIMIT;
use formkit_export::ExportOptions;
use formkit_export::error::ExportError;
use formkit_export::options::DEFAULT_TIMESTAMP_FORMAT;

use crate::error::ServiceError;

/// Tunables for [`crate::FormService`]. Every key is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Cap on dashboard activity entries.
    #[serde(default = "default_activity_limit")]
    pub recent_activity_limit: usize,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// IANA zone name, or `system` for the host zone.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ExportConfig {
    pub fn to_options(&self) -> Result<ExportOptions, ExportError> {
        ExportOptions::for_zone(&self.time_zone, self.timestamp_format.clone())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            recent_activity_limit: default_activity_limit(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_activity_limit() -> usize {
    DEFAULT_RECENT_ACTIVITY_LIMIT
}

fn default_time_zone() -> String {
    "system".to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}
