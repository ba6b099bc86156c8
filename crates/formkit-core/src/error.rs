use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),

    #[error("duplicate field id: {0}")]
    DuplicateFieldId(String),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("field position {index} out of bounds (form has {len} fields)")]
    FieldOutOfBounds { index: usize, len: usize },
}
