//! Validated training table.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::error::DataValidationError;
use super::record::ItemRecord;
use super::schema::{FEATURE_NAMES, N_FEATURES, TARGET_NAME, feature_names};

/// Numeric training data with named columns.
///
/// Features are stored sample-major, `[n_rows, 4]`, in the order
/// `L, W, H, DF`. A table can only be constructed through validation, so a
/// value of this type is always non-empty, finite and schema-ordered.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    feature_names: Vec<String>,
    features: Array2<f64>,
    target_name: String,
    targets: Array1<f64>,
}

impl TrainingTable {
    /// Build a table from named columns.
    ///
    /// # Errors
    ///
    /// - [`DataValidationError::Empty`] when there are no rows
    /// - [`DataValidationError::MissingColumn`] / [`DataValidationError::ColumnOrder`] /
    ///   [`DataValidationError::UnexpectedColumn`] when `feature_names` is not `[L, W, H, DF]`
    /// - [`DataValidationError::TargetName`] when the target is not `optimal_weight`
    /// - shape and finiteness errors otherwise
    pub fn new(
        feature_names: Vec<String>,
        features: Array2<f64>,
        target_name: impl Into<String>,
        targets: Array1<f64>,
    ) -> Result<Self, DataValidationError> {
        let target_name = target_name.into();

        validate_feature_names(&feature_names)?;
        if target_name != TARGET_NAME {
            return Err(DataValidationError::TargetName {
                expected: TARGET_NAME.to_string(),
                found: target_name,
            });
        }
        if features.ncols() != N_FEATURES {
            return Err(DataValidationError::WidthMismatch {
                expected: N_FEATURES,
                found: features.ncols(),
            });
        }
        if features.nrows() != targets.len() {
            return Err(DataValidationError::LengthMismatch {
                features: features.nrows(),
                targets: targets.len(),
            });
        }
        if features.nrows() == 0 {
            return Err(DataValidationError::Empty);
        }

        for (row, sample) in features.outer_iter().enumerate() {
            if let Some(col) = sample.iter().position(|v| !v.is_finite()) {
                return Err(DataValidationError::NonFinite {
                    row,
                    column: feature_names[col].clone(),
                });
            }
        }
        if let Some(row) = targets.iter().position(|v| !v.is_finite()) {
            return Err(DataValidationError::NonFinite {
                row,
                column: target_name,
            });
        }

        Ok(Self {
            feature_names,
            features,
            target_name,
            targets,
        })
    }

    /// Build a table from item records, in record order.
    pub fn from_records(records: &[ItemRecord]) -> Result<Self, DataValidationError> {
        let mut features = Array2::<f64>::zeros((records.len(), N_FEATURES));
        for (mut row, record) in features.outer_iter_mut().zip(records) {
            for (cell, value) in row.iter_mut().zip(record.features()) {
                *cell = value;
            }
        }
        let targets: Array1<f64> = records.iter().map(|r| r.optimal_weight).collect();

        Self::new(feature_names(), features, TARGET_NAME, targets)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Sample-major feature matrix `[n_rows, n_features]`.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.targets.view()
    }
}

/// Check that `names` is exactly `[L, W, H, DF]`, reporting the first defect.
fn validate_feature_names(names: &[String]) -> Result<(), DataValidationError> {
    for expected in FEATURE_NAMES {
        if !names.iter().any(|n| n == expected) {
            return Err(DataValidationError::MissingColumn(expected.to_string()));
        }
    }
    if let Some(extra) = names.iter().find(|n| !FEATURE_NAMES.contains(&n.as_str())) {
        return Err(DataValidationError::UnexpectedColumn(extra.clone()));
    }
    if names.len() != N_FEATURES || names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b) {
        return Err(DataValidationError::ColumnOrder {
            expected: feature_names(),
            found: names.to_vec(),
        });
    }
    Ok(())
}
