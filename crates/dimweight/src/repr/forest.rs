//! Additive ensemble of regression trees.

use ndarray::{Array1, ArrayView2};
use thiserror::Error;

use super::tree::{Tree, TreeValidationError};

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForestValidationError {
    #[error("base score is not finite: {0}")]
    NonFiniteBaseScore(f64),

    #[error("tree {tree_idx}: {error}")]
    InvalidTree {
        tree_idx: usize,
        #[source]
        error: TreeValidationError,
    },
}

/// Single-output forest: `prediction = base_score + Σ tree(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f64,
}

impl Forest {
    pub fn new(base_score: f64) -> Self {
        Self {
            trees: Vec::new(),
            base_score,
        }
    }

    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Score one sample given in feature order.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.predict_row(features))
    }

    /// Score a sample-major `[n_samples, n_features]` matrix.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        features
            .outer_iter()
            .map(|row| match row.as_slice() {
                Some(values) => self.predict_row(values),
                None => self.predict_row(&row.to_vec()),
            })
            .collect()
    }

    /// Validate every tree against `n_features` and the base score.
    pub fn validate(&self, n_features: usize) -> Result<(), ForestValidationError> {
        if !self.base_score.is_finite() {
            return Err(ForestValidationError::NonFiniteBaseScore(self.base_score));
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::MutableTree;
    use ndarray::array;

    fn stump(feature: u32, threshold: f64, left: f64, right: f64) -> Tree {
        let mut tree = MutableTree::new();
        let root = tree.init_root(1.0);
        let (l, r) = tree.apply_split(root, feature, threshold, 1.0, (0.5, 0.5));
        tree.make_leaf(l, left);
        tree.make_leaf(r, right);
        tree.freeze()
    }

    #[test]
    fn sums_base_score_and_trees() {
        let mut forest = Forest::new(10.0);
        forest.push_tree(stump(0, 1.0, -1.0, 1.0));
        forest.push_tree(stump(1, 5.0, 0.25, 0.5));

        assert_eq!(forest.n_trees(), 2);
        assert_eq!(forest.predict_row(&[0.0, 0.0]), 9.25);
        assert_eq!(forest.predict_row(&[2.0, 7.0]), 11.5);

        let batch = forest.predict(array![[0.0, 0.0], [2.0, 7.0]].view());
        assert_eq!(batch.to_vec(), vec![9.25, 11.5]);
    }

    #[test]
    fn empty_forest_predicts_base_score() {
        assert_eq!(Forest::new(3.5).predict_row(&[1.0, 2.0, 3.0, 4.0]), 3.5);
    }

    #[test]
    fn column_major_input_scored() {
        let mut forest = Forest::new(0.0);
        forest.push_tree(stump(1, 5.0, 1.0, 2.0));
        let features = array![[0.0, 9.0], [0.0, 1.0]];
        let transposed = features.t().to_owned();
        let preds = forest.predict(transposed.t());
        assert_eq!(preds.to_vec(), vec![2.0, 1.0]);
    }

    #[test]
    fn validation_reports_tree_index() {
        let mut forest = Forest::new(0.0);
        forest.push_tree(stump(0, 1.0, 0.0, 0.0));
        forest.push_tree(stump(3, 1.0, 0.0, 0.0));
        assert!(forest.validate(4).is_ok());
        assert!(matches!(
            forest.validate(2),
            Err(ForestValidationError::InvalidTree { tree_idx: 1, .. })
        ));
        assert!(matches!(
            Forest::new(f64::NAN).validate(4),
            Err(ForestValidationError::NonFiniteBaseScore(_))
        ));
    }
}
