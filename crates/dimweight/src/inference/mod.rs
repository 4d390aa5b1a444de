//! Serving predictions from model artifacts.
//!
//! - [`open_model`] + [`predict`]: load once, predict many times
//! - [`predict_from_path`]: load, predict and drop on every call
//! - [`SharedModel`]: lazily opened handle shared between callers
//! - [`model_info`]: inspect an artifact without predicting
//!
//! Inputs are bound to the artifact's declared schema `[L, W, H, DF]`. A NaN
//! input is accepted and follows the right branch of every split it meets.

mod info;
mod predictor;
mod shared;

pub use info::{ModelInfo, model_info};
pub use predictor::{
    ModelHandle, PredictError, open_model, predict, predict_from_path, predict_named,
};
pub use shared::SharedModel;
