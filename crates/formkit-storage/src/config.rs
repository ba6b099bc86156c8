use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BUCKET: &str = "formkit";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where forms and responses are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
}

impl StoreConfig {
    /// Read `FORMKIT_BUCKET` and `AWS_REGION`, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bucket: env::var("FORMKIT_BUCKET").unwrap_or_else(|_| default_bucket()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| default_region()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
        }
    }
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
