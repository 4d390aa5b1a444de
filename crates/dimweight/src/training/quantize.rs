//! Feature quantization for histogram split finding.
//!
//! Each feature gets an ascending list of cut values. A value `v` maps to
//! bin `b = #{cuts ≤ v}`, so `n_cuts` cuts give `n_cuts + 1` bins and a split
//! after bin `b` is exactly the tree rule `v < cuts[b]`.
//!
//! # Memory Layout
//!
//! ```text
//! cut_ptrs:    [0, 3, 5]
//! cut_values:  [1.0, 2.5, 4.0,   ← feature 0: 3 cuts (4 bins)
//!               0.7, 0.9]        ← feature 1: 2 cuts (3 bins)
//! ```

use ndarray::ArrayView2;

/// Per-feature cut values in CSR layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BinCuts {
    cut_values: Box<[f64]>,
    /// `cut_ptrs[f]..cut_ptrs[f + 1]` indexes feature `f`'s cuts.
    cut_ptrs: Box<[usize]>,
}

impl BinCuts {
    /// Compute cuts from a sample-major `[n_rows, n_features]` matrix.
    ///
    /// A feature with at most `max_bins` distinct values gets one bin per
    /// value. Otherwise cuts are taken at evenly spaced ranks of the distinct
    /// sorted values. Non-finite values are ignored.
    pub fn from_features(features: ArrayView2<'_, f64>, max_bins: usize) -> Self {
        let max_bins = max_bins.max(2);
        let mut cut_values = Vec::new();
        let mut cut_ptrs = Vec::with_capacity(features.ncols() + 1);
        cut_ptrs.push(0);

        for column in features.columns() {
            let mut distinct: Vec<f64> = column.iter().copied().filter(|v| v.is_finite()).collect();
            distinct.sort_by(f64::total_cmp);
            distinct.dedup();

            // The smallest value never needs a cut: nothing lies below it.
            if distinct.len() <= max_bins {
                cut_values.extend(distinct.iter().skip(1));
            } else {
                let n = distinct.len();
                let mut last = f64::NEG_INFINITY;
                for i in 1..max_bins {
                    let cut = distinct[i * n / max_bins];
                    if cut > last {
                        cut_values.push(cut);
                        last = cut;
                    }
                }
            }
            cut_ptrs.push(cut_values.len());
        }

        Self {
            cut_values: cut_values.into_boxed_slice(),
            cut_ptrs: cut_ptrs.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.cut_ptrs.len() - 1
    }

    #[inline]
    pub fn feature_cuts(&self, feature: usize) -> &[f64] {
        &self.cut_values[self.cut_ptrs[feature]..self.cut_ptrs[feature + 1]]
    }

    /// Number of bins of `feature` (cuts + 1).
    #[inline]
    pub fn n_bins(&self, feature: usize) -> usize {
        self.cut_ptrs[feature + 1] - self.cut_ptrs[feature] + 1
    }

    /// Offset of `feature`'s first bin in a flat histogram.
    #[inline]
    pub fn bin_offset(&self, feature: usize) -> usize {
        self.cut_ptrs[feature] + feature
    }

    /// Bins across all features.
    #[inline]
    pub fn total_bins(&self) -> usize {
        self.cut_values.len() + self.n_features()
    }

    /// Bin of `value` for `feature`. NaN maps to the last bin.
    #[inline]
    pub fn bin_value(&self, feature: usize, value: f64) -> usize {
        let cuts = self.feature_cuts(feature);
        if value.is_nan() {
            return cuts.len();
        }
        cuts.partition_point(|&cut| cut <= value)
    }

    /// Quantize a sample-major matrix into column-major bin indices.
    pub fn bin_matrix(&self, features: ArrayView2<'_, f64>) -> BinnedMatrix {
        debug_assert_eq!(features.ncols(), self.n_features());
        let n_rows = features.nrows();
        let mut bins = Vec::with_capacity(n_rows * self.n_features());
        for (feature, column) in features.columns().into_iter().enumerate() {
            bins.extend(column.iter().map(|&v| self.bin_value(feature, v) as u32));
        }
        BinnedMatrix { bins, n_rows }
    }
}

/// Bin indices stored feature by feature.
#[derive(Debug, Clone)]
pub struct BinnedMatrix {
    bins: Vec<u32>,
    n_rows: usize,
}

impl BinnedMatrix {
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Bins of every row for `feature`.
    #[inline]
    pub fn feature_bins(&self, feature: usize) -> &[u32] {
        &self.bins[feature * self.n_rows..(feature + 1) * self.n_rows]
    }

    #[inline]
    pub fn bin(&self, row: usize, feature: usize) -> u32 {
        self.bins[feature * self.n_rows + row]
    }
}
