//! iris-classifier error types

use std::path::PathBuf;

/// iris-classifier error types
#[derive(Debug, thiserror::Error)]
pub enum IrisError {
    // Artifact errors
    #[error("model file not found at {}", .0.display())]
    ModelNotFound(PathBuf),

    /// The artifact exists but cannot be decoded (corrupt, wrong format
    /// version, or shaped for a different feature vector).
    #[error("artifact error: {0}")]
    Artifact(String),

    // Lifecycle errors
    #[error("model not loaded, call load() first")]
    NotLoaded,

    // Request errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Model errors
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("training failed: {0}")]
    Training(String),

    // Plumbing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<rmp_serde::encode::Error> for IrisError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        IrisError::Artifact(format!("failed to encode model: {err}"))
    }
}

impl From<rmp_serde::decode::Error> for IrisError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        IrisError::Artifact(format!("failed to decode model: {err}"))
    }
}

/// Result type alias for iris-classifier operations
pub type Result<T> = std::result::Result<T, IrisError>;
