use thiserror::Error;

use formkit_core::error::CoreError;
use formkit_export::error::ExportError;
use formkit_storage::StorageError;

/// Failures surfaced to the embedding application. Validation problems are
/// not errors; they come back inside [`crate::Submission::Rejected`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("invalid form: {0}")]
    Core(#[from] CoreError),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
