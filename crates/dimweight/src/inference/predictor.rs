//! Single-item prediction against a model artifact.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::data::schema::{FEATURE_NAMES, N_FEATURES};
use crate::model::WeightModel;
use crate::persist::{self, ReadError};

/// Prediction failures.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The path does not lead to a valid artifact.
    #[error("no valid model at {}: {source}", path.display())]
    ModelNotFound {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("expected {expected} feature values, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// The model's feature tag is not `[L, W, H, DF]`.
    #[error("model declares features {found:?}, expected [L, W, H, DF]")]
    SchemaMismatch { found: Vec<String> },

    #[error("feature {0} not provided")]
    MissingFeature(String),

    #[error("unknown feature {0}")]
    UnknownFeature(String),

    #[error("feature {0} provided more than once")]
    DuplicateFeature(String),
}

impl PredictError {
    /// Whether the inputs could not be bound to the model's schema.
    pub fn is_schema_mismatch(&self) -> bool {
        !matches!(self, Self::ModelNotFound { .. })
    }
}

/// Loaded, validated model shared by reference count.
///
/// Cloning is cheap and the handle is `Send + Sync`; the artifact file is
/// closed once the handle exists.
#[derive(Debug, Clone)]
pub struct ModelHandle(Arc<WeightModel>);

impl ModelHandle {
    /// Wrap an in-memory model after checking its feature tag.
    pub fn new(model: WeightModel) -> Result<Self, PredictError> {
        if !model.meta().has_item_schema() {
            return Err(PredictError::SchemaMismatch {
                found: model.meta().feature_names.clone(),
            });
        }
        Ok(Self(Arc::new(model)))
    }

    pub fn model(&self) -> &WeightModel {
        &self.0
    }

    pub fn feature_names(&self) -> &[String] {
        &self.0.meta().feature_names
    }

    /// Predict from values in schema order `[L, W, H, DF]`.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != N_FEATURES {
            return Err(PredictError::ArityMismatch {
                expected: N_FEATURES,
                found: features.len(),
            });
        }
        Ok(self.0.predict_row(features))
    }

    /// Predict from `(name, value)` pairs in any order.
    pub fn predict_named(&self, features: &[(&str, f64)]) -> Result<f64, PredictError> {
        let mut row = [None; N_FEATURES];
        for &(name, value) in features {
            let idx = FEATURE_NAMES
                .iter()
                .position(|&f| f == name)
                .ok_or_else(|| PredictError::UnknownFeature(name.to_string()))?;
            if row[idx].replace(value).is_some() {
                return Err(PredictError::DuplicateFeature(name.to_string()));
            }
        }

        let mut values = [0.0; N_FEATURES];
        for ((slot, value), name) in values.iter_mut().zip(row).zip(FEATURE_NAMES) {
            *slot = value.ok_or_else(|| PredictError::MissingFeature(name.to_string()))?;
        }
        Ok(self.0.predict_row(&values))
    }
}

/// Read, validate and wrap the artifact at `path`.
///
/// # Errors
///
/// - [`PredictError::ModelNotFound`] if the file is missing, unreadable,
///   malformed or structurally invalid
/// - [`PredictError::SchemaMismatch`] if it declares other features
pub fn open_model(path: impl AsRef<Path>) -> Result<ModelHandle, PredictError> {
    let path = path.as_ref();
    match persist::read_model(path) {
        Ok(model) => ModelHandle::new(model),
        Err(ReadError::FeatureSchema { found }) => Err(PredictError::SchemaMismatch { found }),
        Err(source) => Err(PredictError::ModelNotFound {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Predict one item with an open handle.
#[inline]
pub fn predict(handle: &ModelHandle, features: &[f64]) -> Result<f64, PredictError> {
    handle.predict(features)
}

/// Predict one item by name with an open handle.
#[inline]
pub fn predict_named(handle: &ModelHandle, features: &[(&str, f64)]) -> Result<f64, PredictError> {
    handle.predict_named(features)
}

/// Open the artifact, predict once and drop it.
///
/// Reloads on every call; hold a [`ModelHandle`] or a
/// [`SharedModel`](super::SharedModel) to avoid that.
pub fn predict_from_path(path: impl AsRef<Path>, features: &[f64]) -> Result<f64, PredictError> {
    open_model(path)?.predict(features)
}
