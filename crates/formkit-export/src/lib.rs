//! formkit-export
//!
//! Flattens a form and its responses into a CSV table, and names the
//! downloaded file.

pub mod csv;
pub mod error;
pub mod filename;
pub mod options;

pub use csv::to_csv;
pub use filename::export_filename;
pub use options::ExportOptions;
