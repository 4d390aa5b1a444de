//! Training configuration with builder pattern.
//!
//! [`TrainConfig`] groups boosting, tree, regularization and sampling
//! settings. It is built with `bon` and validated when built.
//!
//! # Example
//!
//! ```
//! use dimweight::training::{SamplingParams, TrainConfig};
//!
//! // All defaults: 50 trees, depth 6, learning rate 0.3, seed 42
//! let config = TrainConfig::builder().build().unwrap();
//! assert_eq!(config.n_trees, 50);
//!
//! let config = TrainConfig::builder()
//!     .n_trees(200)
//!     .learning_rate(0.1)
//!     .sampling(SamplingParams { subsample: 0.8, ..Default::default() })
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use thiserror::Error;

use super::logger::Verbosity;
use super::split::GainParams;

// =============================================================================
// ConfigError
// =============================================================================

/// Invalid training configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("n_trees must be at least 1")]
    InvalidNTrees,

    #[error("learning_rate must be positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("max_depth must be at least 1")]
    InvalidMaxDepth,

    #[error("max_bins must be at least 2, got {0}")]
    InvalidMaxBins(u32),

    #[error("{field} must be non-negative, got {value}")]
    InvalidRegularization { field: &'static str, value: f64 },

    #[error("{field} must be in (0, 1], got {value}")]
    InvalidSamplingRatio { field: &'static str, value: f64 },
}

// =============================================================================
// RegularizationParams
// =============================================================================

/// Split constraints and leaf regularization.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationParams {
    /// L2 regularization on leaf weights. Default: 1.0.
    pub lambda: f64,
    /// Minimum hessian sum in each child. Default: 1.0.
    pub min_child_weight: f64,
    /// Minimum loss reduction to split. Default: 0.0.
    pub min_split_gain: f64,
}

impl Default for RegularizationParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            min_child_weight: 1.0,
            min_split_gain: 0.0,
        }
    }
}

impl RegularizationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("lambda", self.lambda),
            ("min_child_weight", self.min_child_weight),
            ("min_split_gain", self.min_split_gain),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidRegularization { field, value });
            }
        }
        Ok(())
    }

    pub(crate) fn gain_params(&self) -> GainParams {
        GainParams {
            lambda: self.lambda,
            min_child_weight: self.min_child_weight,
            min_split_gain: self.min_split_gain,
        }
    }
}

// =============================================================================
// SamplingParams
// =============================================================================

/// Row and column subsampling. A rate of 1.0 disables sampling and draws
/// nothing from the random stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// Share of rows used per tree. Default: 1.0.
    pub subsample: f64,
    /// Share of features used per tree. Default: 1.0.
    pub colsample_bytree: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            subsample: 1.0,
            colsample_bytree: 1.0,
        }
    }
}

impl SamplingParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("subsample", self.subsample),
            ("colsample_bytree", self.colsample_bytree),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidSamplingRatio { field, value });
            }
        }
        Ok(())
    }
}

// =============================================================================
// TrainConfig
// =============================================================================

/// Configuration for training a weight model.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct TrainConfig {
    /// Boosting rounds. Default: 50.
    #[builder(default = 50)]
    pub n_trees: u32,

    /// Shrinkage applied to every leaf. Default: 0.3.
    #[builder(default = 0.3)]
    pub learning_rate: f64,

    /// Maximum tree depth (depth-wise growth). Default: 6.
    #[builder(default = 6)]
    pub max_depth: u32,

    /// Maximum histogram bins per feature. Default: 256.
    #[builder(default = 256)]
    pub max_bins: u32,

    #[builder(default)]
    pub regularization: RegularizationParams,

    #[builder(default)]
    pub sampling: SamplingParams,

    /// Seed of the sampling stream. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    /// Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: train_config_builder::IsComplete> TrainConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid:
    /// - `n_trees == 0`, `max_depth == 0` or `max_bins < 2`
    /// - `learning_rate <= 0`
    /// - negative regularization parameters
    /// - sampling ratios outside (0, 1]
    pub fn build(self) -> Result<TrainConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trees == 0 {
            return Err(ConfigError::InvalidNTrees);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }
        if self.max_bins < 2 {
            return Err(ConfigError::InvalidMaxBins(self.max_bins));
        }
        self.regularization.validate()?;
        self.sampling.validate()
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        let config = TrainConfig::builder().build().unwrap();
        assert_eq!(config.n_trees, 50);
        assert_relative_eq!(config.learning_rate, 0.3);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.max_bins, 256);
        assert_eq!(config.seed, 42);
        assert_eq!(config.verbosity, Verbosity::Silent);
        assert_eq!(config, TrainConfig::default());
    }

    #[test]
    fn invalid_n_trees_zero() {
        let result = TrainConfig::builder().n_trees(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidNTrees)));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    fn invalid_learning_rate(#[case] learning_rate: f64) {
        let result = TrainConfig::builder().learning_rate(learning_rate).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));
    }

    #[test]
    fn learning_rate_above_one_is_valid() {
        assert!(TrainConfig::builder().learning_rate(1.5).build().is_ok());
    }

    #[test]
    fn invalid_structure() {
        assert!(matches!(
            TrainConfig::builder().max_depth(0).build(),
            Err(ConfigError::InvalidMaxDepth)
        ));
        assert!(matches!(
            TrainConfig::builder().max_bins(1).build(),
            Err(ConfigError::InvalidMaxBins(1))
        ));
    }

    #[test]
    fn invalid_lambda() {
        let result = TrainConfig::builder()
            .regularization(RegularizationParams {
                lambda: -1.0,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRegularization { field: "lambda", .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.5)]
    fn invalid_subsample(#[case] subsample: f64) {
        let result = TrainConfig::builder()
            .sampling(SamplingParams {
                subsample,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSamplingRatio { field: "subsample", .. })
        ));
    }

    #[test]
    fn invalid_colsample_bytree() {
        let result = TrainConfig::builder()
            .sampling(SamplingParams {
                colsample_bytree: 0.0,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSamplingRatio { field: "colsample_bytree", .. })
        ));
    }
}
