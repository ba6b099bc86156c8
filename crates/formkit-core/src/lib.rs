//! formkit-core
//!
//! Pure domain types for forms, fields and responses, the field type
//! registry, and S3 key conventions. No AWS SDK dependency: this is the
//! shared vocabulary every other formkit crate speaks.

pub mod error;
pub mod models;
pub mod registry;
pub mod s3_keys;
