//! Gradient histograms over quantized features.

use super::objective::GradientPair;
use super::quantize::{BinCuts, BinnedMatrix};

/// Per-bin gradient and hessian sums for every feature of one node.
///
/// Bins are flattened in feature order; [`BinCuts::bin_offset`] locates a
/// feature's slice.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHistogram {
    bins: Vec<GradientPair>,
}

impl NodeHistogram {
    pub fn zeros(cuts: &BinCuts) -> Self {
        Self {
            bins: vec![GradientPair::ZERO; cuts.total_bins()],
        }
    }

    /// Accumulate `rows` into a fresh histogram over `features`.
    ///
    /// Features outside `features` stay zero.
    pub fn build(
        cuts: &BinCuts,
        binned: &BinnedMatrix,
        gradients: &[GradientPair],
        rows: &[u32],
        features: &[usize],
    ) -> Self {
        let mut hist = Self::zeros(cuts);
        for &feature in features {
            let offset = cuts.bin_offset(feature);
            let feature_bins = binned.feature_bins(feature);
            for &row in rows {
                let pair = gradients[row as usize];
                let slot = &mut hist.bins[offset + feature_bins[row as usize] as usize];
                slot.grad += pair.grad;
                slot.hess += pair.hess;
            }
        }
        hist
    }

    /// `parent - sibling`, the histogram of the other child.
    pub fn subtract(parent: &Self, sibling: &Self) -> Self {
        debug_assert_eq!(parent.bins.len(), sibling.bins.len());
        let bins = parent
            .bins
            .iter()
            .zip(&sibling.bins)
            .map(|(p, s)| GradientPair::new(p.grad - s.grad, p.hess - s.hess))
            .collect();
        Self { bins }
    }

    /// Bins of `feature`.
    #[inline]
    pub fn feature(&self, cuts: &BinCuts, feature: usize) -> &[GradientPair] {
        let offset = cuts.bin_offset(feature);
        &self.bins[offset..offset + cuts.n_bins(feature)]
    }
}

/// Gradient and hessian totals over `rows`.
pub fn sum_gradients(gradients: &[GradientPair], rows: &[u32]) -> GradientPair {
    rows.iter().fold(GradientPair::ZERO, |acc, &row| {
        let pair = gradients[row as usize];
        GradientPair::new(acc.grad + pair.grad, acc.hess + pair.hess)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn fixture() -> (BinCuts, BinnedMatrix, Vec<GradientPair>) {
        let features = array![[1.0, 5.0], [2.0, 5.0], [2.0, 6.0], [3.0, 6.0]];
        let cuts = BinCuts::from_features(features.view(), 256);
        let binned = cuts.bin_matrix(features.view());
        let grads = vec![
            GradientPair::new(1.0, 1.0),
            GradientPair::new(-2.0, 1.0),
            GradientPair::new(0.5, 1.0),
            GradientPair::new(3.0, 1.0),
        ];
        (cuts, binned, grads)
    }

    #[test]
    fn build_sums_per_bin() {
        let (cuts, binned, grads) = fixture();
        let hist = NodeHistogram::build(&cuts, &binned, &grads, &[0, 1, 2, 3], &[0, 1]);

        let f0 = hist.feature(&cuts, 0);
        assert_eq!(f0.len(), 3);
        assert_abs_diff_eq!(f0[0].grad, 1.0);
        assert_abs_diff_eq!(f0[1].grad, -1.5);
        assert_abs_diff_eq!(f0[1].hess, 2.0);
        assert_abs_diff_eq!(f0[2].grad, 3.0);

        let f1 = hist.feature(&cuts, 1);
        assert_abs_diff_eq!(f1[0].grad, -1.0);
        assert_abs_diff_eq!(f1[1].grad, 3.5);
    }

    #[test]
    fn subtraction_matches_direct_build() {
        let (cuts, binned, grads) = fixture();
        let parent = NodeHistogram::build(&cuts, &binned, &grads, &[0, 1, 2, 3], &[0, 1]);
        let left = NodeHistogram::build(&cuts, &binned, &grads, &[0, 2], &[0, 1]);
        let right = NodeHistogram::build(&cuts, &binned, &grads, &[1, 3], &[0, 1]);
        assert_eq!(NodeHistogram::subtract(&parent, &left), right);
    }

    #[test]
    fn unselected_features_stay_zero() {
        let (cuts, binned, grads) = fixture();
        let hist = NodeHistogram::build(&cuts, &binned, &grads, &[0, 1, 2, 3], &[1]);
        assert!(hist.feature(&cuts, 0).iter().all(|b| *b == GradientPair::ZERO));
    }

    #[test]
    fn totals() {
        let (_, _, grads) = fixture();
        let total = sum_gradients(&grads, &[0, 1, 3]);
        assert_abs_diff_eq!(total.grad, 2.0);
        assert_abs_diff_eq!(total.hess, 3.0);
    }
}
