//! Split finding and gain computation.
//!
//! # Gain Formula
//!
//! ```text
//! gain = 0.5 * [G_L²/(H_L+λ) + G_R²/(H_R+λ) - G²/(H+λ)] - γ
//! ```
//!
//! Where `G, H` are gradient/hessian sums, `λ` is L2 regularization and `γ`
//! the minimum split gain. Negative gains are clamped to zero and a split is
//! only taken when its gain is strictly positive.

use super::histogram::NodeHistogram;
use super::objective::GradientPair;
use super::quantize::BinCuts;

// ============================================================================
// GainParams
// ============================================================================

/// Regularization used by gain and leaf weight computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainParams {
    /// L2 regularization on leaf weights.
    pub lambda: f64,
    /// Minimum hessian sum in a child.
    pub min_child_weight: f64,
    /// Minimum loss reduction to make a split.
    pub min_split_gain: f64,
}

impl Default for GainParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            min_child_weight: 1.0,
            min_split_gain: 0.0,
        }
    }
}

/// Optimal leaf weight `-G / (H + λ)`, before learning rate.
#[inline]
pub fn leaf_weight(sum_grad: f64, sum_hess: f64, params: &GainParams) -> f64 {
    let h = sum_hess + params.lambda;
    if h <= 0.0 {
        return 0.0;
    }
    -sum_grad / h
}

/// `-0.5 * G² / (H + λ)`; lower is better.
#[inline]
fn leaf_objective(sum_grad: f64, sum_hess: f64, params: &GainParams) -> f64 {
    let h = sum_hess + params.lambda;
    if h <= 0.0 {
        return 0.0;
    }
    -0.5 * sum_grad * sum_grad / h
}

/// Loss reduction from splitting `parent` into `left` and `right`.
#[inline]
pub fn split_gain(
    left: GradientPair,
    right: GradientPair,
    parent: GradientPair,
    params: &GainParams,
) -> f64 {
    let obj_left = leaf_objective(left.grad, left.hess, params);
    let obj_right = leaf_objective(right.grad, right.hess, params);
    let obj_parent = leaf_objective(parent.grad, parent.hess, params);

    (obj_parent - obj_left - obj_right - params.min_split_gain).max(0.0)
}

// ============================================================================
// SplitInfo
// ============================================================================

/// Best split found for a node.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitInfo {
    pub feature: usize,
    /// Rows with `bin <= split_bin` go left.
    pub split_bin: usize,
    /// Go left if `value < threshold`.
    pub threshold: f64,
    pub gain: f64,
    pub left: GradientPair,
    pub right: GradientPair,
}

/// Scan the histogram of every feature in `features` and return the split
/// with the highest positive gain.
///
/// Ties keep the first candidate in (feature, bin) order, so the result
/// does not depend on anything but the inputs.
pub fn find_best_split(
    hist: &NodeHistogram,
    cuts: &BinCuts,
    features: &[usize],
    parent: GradientPair,
    params: &GainParams,
) -> Option<SplitInfo> {
    let mut best: Option<SplitInfo> = None;

    for &feature in features {
        let bins = hist.feature(cuts, feature);
        let feature_cuts = cuts.feature_cuts(feature);

        let mut left = GradientPair::ZERO;
        // The boundary after the last bin is not a split.
        for (bin, pair) in bins.iter().take(feature_cuts.len()).enumerate() {
            left.grad += pair.grad;
            left.hess += pair.hess;
            let right = GradientPair::new(parent.grad - left.grad, parent.hess - left.hess);

            if left.hess < params.min_child_weight || right.hess < params.min_child_weight {
                continue;
            }

            let gain = split_gain(left, right, parent, params);
            if gain > 0.0 && best.as_ref().is_none_or(|b| gain > b.gain) {
                best = Some(SplitInfo {
                    feature,
                    split_bin: bin,
                    threshold: feature_cuts[bin],
                    gain,
                    left,
                    right,
                });
            }
        }
    }

    best
}
