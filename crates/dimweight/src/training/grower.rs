//! Depth-wise tree growth over gradient histograms.
//!
//! Every node of a level is expanded before the next level starts. Only the
//! smaller child of a split builds its histogram from rows; the larger one
//! is derived by subtracting it from the parent.

use super::histogram::{NodeHistogram, sum_gradients};
use super::objective::GradientPair;
use super::quantize::{BinCuts, BinnedMatrix};
use super::split::{GainParams, find_best_split, leaf_weight};
use crate::repr::{MutableTree, NodeId};

/// Parameters of a single tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowerParams {
    pub max_depth: u32,
    pub learning_rate: f64,
    pub gain: GainParams,
}

/// A node waiting to be split or turned into a leaf.
struct Candidate {
    node: NodeId,
    rows: Vec<u32>,
    totals: GradientPair,
    histogram: NodeHistogram,
}

/// Grows one regression tree per call.
#[derive(Debug)]
pub struct TreeGrower<'a> {
    cuts: &'a BinCuts,
    binned: &'a BinnedMatrix,
    params: GrowerParams,
}

impl<'a> TreeGrower<'a> {
    pub fn new(cuts: &'a BinCuts, binned: &'a BinnedMatrix, params: GrowerParams) -> Self {
        Self {
            cuts,
            binned,
            params,
        }
    }

    pub fn params(&self) -> &GrowerParams {
        &self.params
    }

    /// Grow a tree on `rows`, considering only `features`.
    ///
    /// Leaf values are `-G/(H+λ)` scaled by the learning rate.
    pub fn grow(
        &self,
        gradients: &[GradientPair],
        rows: Vec<u32>,
        features: &[usize],
    ) -> MutableTree {
        let totals = sum_gradients(gradients, &rows);
        let mut tree = MutableTree::new();
        let root = tree.init_root(totals.hess);

        let histogram = NodeHistogram::build(self.cuts, self.binned, gradients, &rows, features);
        let mut level = vec![Candidate {
            node: root,
            rows,
            totals,
            histogram,
        }];

        for depth in 0..=self.params.max_depth {
            let mut next_level = Vec::new();

            for candidate in level {
                let split = if depth < self.params.max_depth {
                    find_best_split(
                        &candidate.histogram,
                        self.cuts,
                        features,
                        candidate.totals,
                        &self.params.gain,
                    )
                } else {
                    None
                };

                let Some(split) = split else {
                    let value = leaf_weight(
                        candidate.totals.grad,
                        candidate.totals.hess,
                        &self.params.gain,
                    );
                    tree.make_leaf(candidate.node, value);
                    continue;
                };

                let feature_bins = self.binned.feature_bins(split.feature);
                let (left_rows, right_rows): (Vec<u32>, Vec<u32>) = candidate
                    .rows
                    .iter()
                    .partition(|&&row| feature_bins[row as usize] as usize <= split.split_bin);

                let (left, right) = tree.apply_split(
                    candidate.node,
                    split.feature as u32,
                    split.threshold,
                    split.gain,
                    (split.left.hess, split.right.hess),
                );

                let (left_hist, right_hist) = if left_rows.len() <= right_rows.len() {
                    let small = NodeHistogram::build(
                        self.cuts,
                        self.binned,
                        gradients,
                        &left_rows,
                        features,
                    );
                    let large = NodeHistogram::subtract(&candidate.histogram, &small);
                    (small, large)
                } else {
                    let small = NodeHistogram::build(
                        self.cuts,
                        self.binned,
                        gradients,
                        &right_rows,
                        features,
                    );
                    let large = NodeHistogram::subtract(&candidate.histogram, &small);
                    (large, small)
                };

                next_level.push(Candidate {
                    node: left,
                    rows: left_rows,
                    totals: split.left,
                    histogram: left_hist,
                });
                next_level.push(Candidate {
                    node: right,
                    rows: right_rows,
                    totals: split.right,
                    histogram: right_hist,
                });
            }

            if next_level.is_empty() {
                break;
            }
            level = next_level;
        }

        tree.apply_learning_rate(self.params.learning_rate);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    fn params(max_depth: u32) -> GrowerParams {
        GrowerParams {
            max_depth,
            learning_rate: 1.0,
            gain: GainParams {
                lambda: 0.0,
                min_child_weight: 1.0,
                min_split_gain: 0.0,
            },
        }
    }

    /// Gradients of squared loss at prediction 0: `-y`.
    fn gradients(targets: &[f64]) -> Vec<GradientPair> {
        targets.iter().map(|&y| GradientPair::new(-y, 1.0)).collect()
    }

    #[test]
    fn step_function_is_learned_exactly() {
        let features = array![[1.0], [2.0], [3.0], [4.0]];
        let cuts = BinCuts::from_features(features.view(), 256);
        let binned = cuts.bin_matrix(features.view());
        let grower = TreeGrower::new(&cuts, &binned, params(3));

        let grads = gradients(&[10.0, 10.0, 30.0, 30.0]);
        let tree = grower.grow(&grads, vec![0, 1, 2, 3], &[0]).freeze();

        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.threshold(0), 3.0);
        assert_abs_diff_eq!(tree.predict_row(&[1.5]), 10.0);
        assert_abs_diff_eq!(tree.predict_row(&[3.5]), 30.0);
        assert_abs_diff_eq!(tree.covers().unwrap()[0], 4.0);
    }

    #[test]
    fn depth_limit_respected() {
        let values: Vec<f64> = (0..64).map(f64::from).collect();
        let features = Array2::from_shape_vec((64, 1), values.clone()).unwrap();
        let cuts = BinCuts::from_features(features.view(), 256);
        let binned = cuts.bin_matrix(features.view());
        let rows: Vec<u32> = (0..64).collect();

        for max_depth in [1, 2, 4] {
            let grower = TreeGrower::new(&cuts, &binned, params(max_depth));
            let tree = grower.grow(&gradients(&values), rows.clone(), &[0]).freeze();
            assert_eq!(tree.depth(), max_depth as usize);
            tree.validate(1).unwrap();
        }
    }

    #[test]
    fn learning_rate_shrinks_leaves() {
        let features = array![[1.0], [2.0]];
        let cuts = BinCuts::from_features(features.view(), 256);
        let binned = cuts.bin_matrix(features.view());
        let grower = TreeGrower::new(
            &cuts,
            &binned,
            GrowerParams {
                learning_rate: 0.5,
                ..params(2)
            },
        );

        let tree = grower.grow(&gradients(&[4.0, 8.0]), vec![0, 1], &[0]).freeze();
        assert_abs_diff_eq!(tree.predict_row(&[1.0]), 2.0);
        assert_abs_diff_eq!(tree.predict_row(&[2.0]), 4.0);
    }

    #[test]
    fn constant_target_gives_single_leaf() {
        let features = array![[1.0], [2.0], [3.0]];
        let cuts = BinCuts::from_features(features.view(), 256);
        let binned = cuts.bin_matrix(features.view());
        let grower = TreeGrower::new(&cuts, &binned, params(6));

        let tree = grower.grow(&gradients(&[5.0, 5.0, 5.0]), vec![0, 1, 2], &[0]).freeze();
        assert_eq!(tree.n_nodes(), 1);
        assert_abs_diff_eq!(tree.leaf_value(0), 5.0);
    }

    #[test]
    fn only_sampled_rows_contribute() {
        let features = array![[1.0], [2.0], [3.0]];
        let cuts = BinCuts::from_features(features.view(), 256);
        let binned = cuts.bin_matrix(features.view());
        let grower = TreeGrower::new(&cuts, &binned, params(1));

        let tree = grower.grow(&gradients(&[100.0, 6.0, 6.0]), vec![1, 2], &[0]).freeze();
        assert_eq!(tree.n_nodes(), 1);
        assert_abs_diff_eq!(tree.leaf_value(0), 6.0);
    }
}
