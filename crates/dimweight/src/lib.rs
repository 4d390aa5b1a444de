//! dimweight: synthetic warehouse items and dimensional weight prediction.
//!
//! A two-stage pipeline: a seeded generator of physically plausible item
//! records with injected outliers, and a gradient boosted regression tree
//! ensemble that predicts an item's shipping weight from its dimensions and
//! density factor.
//!
//! # Key Types
//!
//! - [`ItemRecord`] / [`TrainingTable`] - Generated items and validated training data
//! - [`ItemGenerator`] / [`GeneratorParams`] - Seeded synthetic data
//! - [`TrainConfig`] / [`WeightModel`] - Training configuration and the trained model
//! - [`ModelHandle`] / [`SharedModel`] - Loaded artifacts for prediction
//! - [`Error`] / [`ErrorKind`] - Crate-wide error and failure class
//!
//! # Pipeline
//!
//! ```
//! use dimweight::{TrainingTable, generate, open_model, predict, train};
//!
//! let records = generate(300, 42)?;
//! let table = TrainingTable::from_records(&records)?;
//! let model = train(&table, 20, 42)?;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("model.json");
//! model.save(&path)?;
//!
//! let handle = open_model(&path)?;
//! let grams = predict(&handle, &[30.0, 20.0, 15.0, 0.85])?;
//! assert!(grams > 0.0);
//! # Ok::<(), dimweight::Error>(())
//! ```

pub mod data;
pub mod error;
pub mod inference;
pub mod model;
pub mod persist;
pub mod repr;
pub mod synthetic;
pub mod training;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::{Error, ErrorKind, Result};

// Pipeline entry points
pub use inference::{
    ModelHandle, ModelInfo, PredictError, SharedModel, model_info, open_model, predict,
    predict_from_path, predict_named,
};
pub use model::{TrainError, WeightModel, train, train_to_path};
pub use synthetic::{GenerationError, GeneratorParams, ItemGenerator, generate};

// Data and configuration
pub use data::{DataValidationError, DatasetSummary, ItemRecord, TrainingTable};
pub use training::{ConfigError, TrainConfig, Verbosity};
