//! Conversion between runtime types and schema types.
//!
//! Writing is a lossless `From`; reading is a validating `TryFrom` that
//! rejects anything [`Forest::validate`] would and checks the feature tag
//! last, so a structurally broken artifact is never reported as a schema
//! mismatch.

use super::error::ReadError;
use super::schema::{ForestSchema, ModelMetaSchema, TrainingSchema, TreeSchema, WeightModelSchema};
use crate::model::{ModelMeta, TrainingSummary, WeightModel};
use crate::repr::{Forest, Tree};

// =============================================================================
// Metadata
// =============================================================================

impl From<&ModelMeta> for ModelMetaSchema {
    fn from(meta: &ModelMeta) -> Self {
        Self {
            feature_names: meta.feature_names.clone(),
            target_name: meta.target_name.clone(),
            num_features: meta.n_features(),
            objective: meta.objective.clone(),
        }
    }
}

impl TryFrom<ModelMetaSchema> for ModelMeta {
    type Error = ReadError;

    fn try_from(schema: ModelMetaSchema) -> Result<Self, Self::Error> {
        if schema.num_features != schema.feature_names.len() {
            return Err(ReadError::Validation(format!(
                "num_features is {} but {} feature names are declared",
                schema.num_features,
                schema.feature_names.len()
            )));
        }
        Ok(Self {
            feature_names: schema.feature_names,
            target_name: schema.target_name,
            objective: schema.objective,
        })
    }
}

impl From<&TrainingSummary> for TrainingSchema {
    fn from(summary: &TrainingSummary) -> Self {
        Self {
            n_trees: summary.n_trees,
            learning_rate: summary.learning_rate,
            max_depth: summary.max_depth,
            seed: summary.seed,
            n_rows: summary.n_rows,
        }
    }
}

impl From<TrainingSchema> for TrainingSummary {
    fn from(schema: TrainingSchema) -> Self {
        Self {
            n_trees: schema.n_trees,
            learning_rate: schema.learning_rate,
            max_depth: schema.max_depth,
            seed: schema.seed,
            n_rows: schema.n_rows,
        }
    }
}

// =============================================================================
// Tree / Forest
// =============================================================================

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        Self {
            num_nodes: tree.n_nodes() as u32,
            split_indices: tree.split_indices().to_vec(),
            thresholds: tree.thresholds().to_vec(),
            children_left: tree.left_children().to_vec(),
            children_right: tree.right_children().to_vec(),
            is_leaf: tree.leaf_flags().to_vec(),
            leaf_values: tree.leaf_values().to_vec(),
            gains: tree.gains().map(<[f64]>::to_vec),
            covers: tree.covers().map(<[f64]>::to_vec),
        }
    }
}

/// Tree conversion checks array lengths only; structure is checked by
/// [`Forest::validate`] once the feature count is known.
impl TryFrom<TreeSchema> for Tree {
    type Error = ReadError;

    fn try_from(schema: TreeSchema) -> Result<Self, Self::Error> {
        let n_nodes = schema.num_nodes as usize;
        let lengths = [
            ("split_indices", schema.split_indices.len()),
            ("thresholds", schema.thresholds.len()),
            ("children_left", schema.children_left.len()),
            ("children_right", schema.children_right.len()),
            ("is_leaf", schema.is_leaf.len()),
            ("leaf_values", schema.leaf_values.len()),
            ("gains", schema.gains.as_ref().map_or(n_nodes, Vec::len)),
            ("covers", schema.covers.as_ref().map_or(n_nodes, Vec::len)),
        ];
        if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != n_nodes) {
            return Err(ReadError::Validation(format!(
                "{field} has {len} entries, num_nodes is {n_nodes}"
            )));
        }

        Ok(Tree::new(
            schema.split_indices,
            schema.thresholds,
            schema.children_left,
            schema.children_right,
            schema.is_leaf,
            schema.leaf_values,
        )
        .with_stats(schema.gains, schema.covers))
    }
}

impl From<&Forest> for ForestSchema {
    fn from(forest: &Forest) -> Self {
        Self {
            base_score: forest.base_score(),
            trees: forest.trees().map(TreeSchema::from).collect(),
        }
    }
}

impl TryFrom<ForestSchema> for Forest {
    type Error = ReadError;

    fn try_from(schema: ForestSchema) -> Result<Self, Self::Error> {
        let mut forest = Forest::new(schema.base_score);
        for (tree_idx, tree_schema) in schema.trees.into_iter().enumerate() {
            let tree = Tree::try_from(tree_schema).map_err(|e| match e {
                ReadError::Validation(msg) => {
                    ReadError::Validation(format!("tree {tree_idx}: {msg}"))
                }
                other => other,
            })?;
            forest.push_tree(tree);
        }
        Ok(forest)
    }
}

// =============================================================================
// WeightModel
// =============================================================================

impl From<&WeightModel> for WeightModelSchema {
    fn from(model: &WeightModel) -> Self {
        Self {
            meta: ModelMetaSchema::from(model.meta()),
            forest: ForestSchema::from(model.forest()),
            training: TrainingSchema::from(model.training()),
        }
    }
}

impl TryFrom<WeightModelSchema> for WeightModel {
    type Error = ReadError;

    fn try_from(schema: WeightModelSchema) -> Result<Self, Self::Error> {
        let meta = ModelMeta::try_from(schema.meta)?;
        let forest = Forest::try_from(schema.forest)?;
        forest.validate(meta.n_features())?;

        if !meta.has_item_schema() {
            return Err(ReadError::FeatureSchema {
                found: meta.feature_names,
            });
        }

        Ok(WeightModel::from_parts(
            forest,
            meta,
            TrainingSummary::from(schema.training),
        ))
    }
}
