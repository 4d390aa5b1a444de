//! Weight model: a trained forest plus the schema it binds.
//!
//! Access components via [`forest()`](WeightModel::forest),
//! [`meta()`](WeightModel::meta) and [`training()`](WeightModel::training).

use std::path::Path;

use ndarray::{Array1, ArrayView2};
use rand::Rng;
use thiserror::Error;
use tracing::info;

use super::meta::{ModelMeta, TrainingSummary};
use crate::data::{DataValidationError, TrainingTable, read_training_table};
use crate::persist::{self, PersistError, ReadError};
use crate::repr::Forest;
use crate::training::{ConfigError, GBDTTrainer, MetricFn, ObjectiveFn, TrainConfig};

/// Errors from the training entry points.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Data(#[from] DataValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Trained predictor of `optimal_weight` from `[L, W, H, DF]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightModel {
    forest: Forest,
    meta: ModelMeta,
    training: TrainingSummary,
}

impl WeightModel {
    /// Assemble a model from its parts. No validation is performed; loaded
    /// artifacts are validated by [`persist`](crate::persist) before this.
    pub fn from_parts(forest: Forest, meta: ModelMeta, training: TrainingSummary) -> Self {
        Self {
            forest,
            meta,
            training,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn training(&self) -> &TrainingSummary {
        &self.training
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }

    // =========================================================================
    // Training
    // =========================================================================

    /// Train on `table` with squared error, seeding sampling from
    /// `config.seed`.
    ///
    /// # Errors
    ///
    /// [`TrainError::Config`] if `config` fails validation.
    pub fn train(table: &TrainingTable, config: TrainConfig) -> Result<Self, TrainError> {
        config.validate()?;
        let trainer = GBDTTrainer::regression(config);
        let forest = trainer.train(table);
        Ok(Self::assemble(forest, table, trainer.objective(), trainer.config()))
    }

    /// Like [`train`](Self::train), drawing sampling decisions from `rng`.
    pub fn train_with_rng<R: Rng + ?Sized>(
        table: &TrainingTable,
        config: TrainConfig,
        rng: &mut R,
    ) -> Result<Self, TrainError> {
        config.validate()?;
        let trainer = GBDTTrainer::regression(config);
        let forest = trainer.train_with_rng(table, rng);
        Ok(Self::assemble(forest, table, trainer.objective(), trainer.config()))
    }

    fn assemble<O: ObjectiveFn>(
        forest: Forest,
        table: &TrainingTable,
        objective: &O,
        config: &TrainConfig,
    ) -> Self {
        let meta = ModelMeta {
            feature_names: table.feature_names().to_vec(),
            target_name: table.target_name().to_string(),
            objective: objective.name().to_string(),
        };
        Self::from_parts(forest, meta, TrainingSummary::new(config, table.n_rows()))
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Predict one item given `[L, W, H, DF]`.
    #[inline]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.forest.predict_row(features)
    }

    /// Predict every row of a `[n_samples, 4]` matrix.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        self.forest.predict(features)
    }

    /// Score the model on `table` with `metric`.
    pub fn evaluate<M: MetricFn>(&self, table: &TrainingTable, metric: &M) -> f64 {
        let predictions = self.predict(table.features());
        metric.compute(predictions.view(), table.targets())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the model to a new artifact at `path`.
    ///
    /// # Errors
    ///
    /// [`PersistError::AlreadyExists`] if `path` exists; it is never
    /// overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        persist::write_model(self, path)
    }

    /// Read and validate an artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        persist::read_model(path)
    }
}

/// Train a model on `table` for `round_count` rounds.
///
/// Uses the default configuration otherwise: squared error, depth 6,
/// learning rate 0.3, no sampling.
///
/// # Example
///
/// ```
/// use dimweight::data::TrainingTable;
/// use dimweight::{generate, train};
///
/// let records = generate(200, 42).unwrap();
/// let table = TrainingTable::from_records(&records).unwrap();
/// let model = train(&table, 10, 42).unwrap();
/// assert_eq!(model.n_trees(), 10);
/// ```
pub fn train(
    table: &TrainingTable,
    round_count: u32,
    seed: u64,
) -> Result<WeightModel, TrainError> {
    let config = TrainConfig::builder()
        .n_trees(round_count)
        .seed(seed)
        .build()?;
    WeightModel::train(table, config)
}

/// Train on the dataset file at `dataset` and write the artifact to
/// `artifact`.
///
/// # Errors
///
/// - [`TrainError::Data`] if the dataset cannot be read or fails validation
/// - [`TrainError::Config`] if `round_count` is zero
/// - [`TrainError::Persist`] if the artifact cannot be written or exists
pub fn train_to_path(
    dataset: impl AsRef<Path>,
    artifact: impl AsRef<Path>,
    round_count: u32,
    seed: u64,
) -> Result<WeightModel, TrainError> {
    let table = read_training_table(dataset)?;
    let model = train(&table, round_count, seed)?;
    model.save(&artifact)?;
    info!(
        path = %artifact.as_ref().display(),
        n_trees = model.n_trees(),
        n_rows = table.n_rows(),
        "model saved"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::generate;
    use crate::training::{Mae, Rmse, SamplingParams, SquaredLoss};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table(n: i64, seed: u64) -> TrainingTable {
        TrainingTable::from_records(&generate(n, seed).unwrap()).unwrap()
    }

    #[test]
    fn train_records_meta_and_summary() {
        let data = table(150, 1);
        let model = train(&data, 5, 9).unwrap();

        assert_eq!(model.n_trees(), 5);
        assert!(model.meta().has_item_schema());
        assert_eq!(model.meta().target_name, "optimal_weight");
        assert_eq!(model.meta().objective, SquaredLoss::NAME);
        assert_eq!(model.training().n_trees, 5);
        assert_eq!(model.training().seed, 9);
        assert_eq!(model.training().n_rows, 150);
    }

    #[test]
    fn zero_rounds_is_config_error() {
        let data = table(20, 1);
        assert!(matches!(
            train(&data, 0, 1),
            Err(TrainError::Config(ConfigError::InvalidNTrees))
        ));
    }

    #[test]
    fn batch_matches_row_prediction() {
        let data = table(100, 2);
        let model = train(&data, 10, 2).unwrap();
        let batch = model.predict(data.features());
        for (row, &expected) in data.features().outer_iter().zip(batch.iter()) {
            assert_eq!(model.predict_row(&row.to_vec()), expected);
        }
    }

    #[test]
    fn evaluate_uses_metric() {
        let data = table(100, 3);
        let model = train(&data, 20, 3).unwrap();
        let rmse = model.evaluate(&data, &Rmse);
        let mae = model.evaluate(&data, &Mae);
        assert!(mae <= rmse + 1e-12);
        assert!(rmse > 0.0);
    }

    #[test]
    fn train_with_rng_matches_seeded_train() {
        let data = table(80, 4);
        let config = TrainConfig::builder()
            .n_trees(4)
            .sampling(SamplingParams {
                subsample: 0.8,
                colsample_bytree: 1.0,
            })
            .seed(17)
            .build()
            .unwrap();

        let seeded = WeightModel::train(&data, config.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let streamed = WeightModel::train_with_rng(&data, config, &mut rng).unwrap();
        assert_eq!(seeded, streamed);
    }

    #[test]
    fn single_row_table_predicts_its_target() {
        let records = generate(1, 5).unwrap();
        let data = TrainingTable::from_records(&records).unwrap();
        let model = train(&data, 3, 5).unwrap();
        assert_abs_diff_eq!(
            model.predict_row(&records[0].features()),
            records[0].optimal_weight
        );
    }
}
