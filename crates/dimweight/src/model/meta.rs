//! Model metadata and training summary.

use crate::data::schema::{self, TARGET_NAME};
use crate::training::TrainConfig;

/// What a model predicts and from which inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
    /// Feature names in binding order.
    pub feature_names: Vec<String>,
    pub target_name: String,
    /// Objective the forest was trained with.
    pub objective: String,
}

impl ModelMeta {
    /// Metadata for the item schema `[L, W, H, DF] -> optimal_weight`.
    pub fn for_items(objective: impl Into<String>) -> Self {
        Self {
            feature_names: schema::feature_names(),
            target_name: TARGET_NAME.to_string(),
            objective: objective.into(),
        }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Whether the declared features are exactly `[L, W, H, DF]`.
    pub fn has_item_schema(&self) -> bool {
        schema::is_item_schema(&self.feature_names)
    }
}

/// The parameters a forest was trained with.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub n_trees: u32,
    pub learning_rate: f64,
    pub max_depth: u32,
    pub seed: u64,
    /// Rows in the training table.
    pub n_rows: usize,
}

impl TrainingSummary {
    pub fn new(config: &TrainConfig, n_rows: usize) -> Self {
        Self {
            n_trees: config.n_trees,
            learning_rate: config.learning_rate,
            max_depth: config.max_depth,
            seed: config.seed,
            n_rows,
        }
    }
}
