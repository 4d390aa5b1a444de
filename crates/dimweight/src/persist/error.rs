//! Persistence errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::repr::ForestValidationError;

/// Errors reading an artifact.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a JSON artifact, or fields missing or mistyped.
    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Array lengths or metadata inconsistent.
    #[error("invalid artifact: {0}")]
    Validation(String),

    #[error("invalid forest: {0}")]
    Forest(#[from] ForestValidationError),

    /// The feature tag is not `[L, W, H, DF]`.
    #[error("artifact declares features {found:?}, expected [L, W, H, DF]")]
    FeatureSchema { found: Vec<String> },
}

impl ReadError {
    /// Whether the artifact is sound but declares a different feature schema.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::FeatureSchema { .. })
    }
}

/// Errors writing an artifact.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Artifacts are never overwritten.
    #[error("artifact already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("encoding error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("refusing to write invalid model: {0}")]
    InvalidModel(#[from] ForestValidationError),
}
