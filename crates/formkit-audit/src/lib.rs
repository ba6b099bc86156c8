//! formkit-audit
//!
//! Structured audit events for form lifecycle and submissions, logged
//! through `tracing`.

pub mod events;

pub use events::{AuditAction, AuditEvent};
