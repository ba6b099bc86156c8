//! formkit-analytics
//!
//! Per-field summary statistics over a form's responses. Deterministic and
//! free of I/O; callers fetch the form and responses from the store.

pub mod aggregate;
pub mod stats;

pub use aggregate::aggregate;
pub use stats::{FieldAnalytic, FormAnalytics, OptionCount};
