//! Error handling

use thiserror::Error;

use crate::logic::features::LayoutMismatchError;

pub type Result<T> = std::result::Result<T, TriageError>;

#[derive(Debug, Error)]
pub enum TriageError {
    // Input errors
    #[error("Missing or non-numeric required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    // Model errors
    #[error("Diagnosis model is not trained or loaded")]
    ModelNotReady,

    #[error("Invalid diagnosis label: {0}")]
    InvalidLabel(String),

    #[error("Invalid training configuration: {0}")]
    InvalidTrainingConfig(String),

    // Artifact errors
    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("Model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Malformed model: {0}")]
    MalformedModel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TriageError {
    /// Errors caused by the caller's input rather than the engine
    pub fn is_input_error(&self) -> bool {
        matches!(self, TriageError::MissingField { .. } | TriageError::InvalidField { .. })
    }
}
