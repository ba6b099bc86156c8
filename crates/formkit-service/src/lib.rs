//! formkit-service
//!
//! The entry point the UI layer calls. Wires a [`FormStore`] to the
//! validator, aggregator, exporter and audit log.
//!
//! [`FormStore`]: formkit_storage::FormStore

pub mod config;
pub mod error;
pub mod service;

pub use config::{ExportConfig, ServiceConfig};
pub use error::ServiceError;
pub use service::{CsvExport, FormService, Submission};
