use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to format submission time: {0}")]
    Timestamp(#[from] jiff::Error),

    #[error("unknown time zone: {0}")]
    TimeZone(String),
}
