//! Serialized artifact layout.
//!
//! Schema types are separate from the runtime types so the file format can
//! be validated on read and evolve independently.

use serde::{Deserialize, Serialize};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Top-level document: `{format_version, model}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEnvelope {
    pub format_version: u32,
    pub model: WeightModelSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightModelSchema {
    pub meta: ModelMetaSchema,
    pub forest: ForestSchema,
    pub training: TrainingSchema,
}

/// Model metadata schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    /// Feature tag; consumers verify it before binding inputs.
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub num_features: usize,
    pub objective: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    pub base_score: f64,
    /// Trees in boosting order.
    pub trees: Vec<TreeSchema>,
}

/// Tree schema (SoA layout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f64>,
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    pub is_leaf: Vec<bool>,
    pub leaf_values: Vec<f64>,
    /// Split gain per node (0 for leaves).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gains: Option<Vec<f64>>,
    /// Hessian sum per node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covers: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSchema {
    pub n_trees: u32,
    pub learning_rate: f64,
    pub max_depth: u32,
    pub seed: u64,
    pub n_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_skip_when_absent() {
        let tree = TreeSchema {
            num_nodes: 1,
            split_indices: vec![0],
            thresholds: vec![0.0],
            children_left: vec![0],
            children_right: vec![0],
            is_leaf: vec![true],
            leaf_values: vec![1.5],
            gains: None,
            covers: None,
        };

        let json = serde_json::to_string(&tree).unwrap();
        assert!(!json.contains("gains"));
        assert!(!json.contains("covers"));

        let parsed: TreeSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.leaf_values, vec![1.5]);
        assert!(parsed.gains.is_none());
    }
}
