//! Gradient boosted tree training.
//!
//! # Overview
//!
//! Training runs a fixed number of boosting rounds. Each round computes
//! gradients of the objective at the current predictions, optionally samples
//! rows and features, grows one tree depth-wise over quantized feature
//! histograms, and adds that tree to the [`Forest`](crate::repr::Forest).
//!
//! # Key Types
//!
//! - [`TrainConfig`]: hyperparameters, built and validated with `bon`
//! - [`GBDTTrainer`]: the boosting loop
//! - [`ObjectiveFn`] / [`SquaredLoss`]: loss gradients and base score
//! - [`MetricFn`] / [`Rmse`] / [`Mae`]: evaluation metrics
//! - [`TrainingLogger`] / [`Verbosity`]: progress reporting

mod config;
mod grower;
mod histogram;
mod logger;
mod metrics;
mod objective;
mod quantize;
mod sampling;
mod split;
mod trainer;

pub use config::{ConfigError, RegularizationParams, SamplingParams, TrainConfig};
pub use grower::{GrowerParams, TreeGrower};
pub use histogram::{NodeHistogram, sum_gradients};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{Mae, MetricFn, Rmse};
pub use objective::{GradientPair, ObjectiveFn, SquaredLoss};
pub use quantize::{BinCuts, BinnedMatrix};
pub use sampling::{ColSampler, RowSampler};
pub use split::{GainParams, SplitInfo, find_best_split, leaf_weight, split_gain};
pub use trainer::GBDTTrainer;
