//! GBDT trainer.
//!
//! Orchestrates gradient computation, sampling, tree growth and prediction
//! updates. Use [`GBDTTrainer::train`] to fit a [`Forest`] on a
//! [`TrainingTable`].

use ndarray::Array1;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::TrainConfig;
use super::grower::{GrowerParams, TreeGrower};
use super::logger::TrainingLogger;
use super::metrics::{MetricFn, Rmse};
use super::objective::{GradientPair, ObjectiveFn, SquaredLoss};
use super::quantize::BinCuts;
use super::sampling::{ColSampler, RowSampler};
use crate::data::TrainingTable;
use crate::repr::Forest;

// =============================================================================
// GBDTTrainer
// =============================================================================

/// Gradient boosted decision tree trainer.
///
/// The configuration is assumed valid; [`TrainConfig::builder`] validates
/// on build.
#[derive(Debug, Clone)]
pub struct GBDTTrainer<O: ObjectiveFn = SquaredLoss, M: MetricFn = Rmse> {
    objective: O,
    metric: M,
    config: TrainConfig,
}

impl GBDTTrainer {
    /// Squared error trainer reporting RMSE.
    pub fn regression(config: TrainConfig) -> Self {
        Self::new(SquaredLoss, Rmse, config)
    }
}

impl<O: ObjectiveFn, M: MetricFn> GBDTTrainer<O, M> {
    pub fn new(objective: O, metric: M, config: TrainConfig) -> Self {
        Self {
            objective,
            metric,
            config,
        }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Train a forest with a stream seeded from the configured seed.
    pub fn train(&self, table: &TrainingTable) -> Forest {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.train_with_rng(table, &mut rng)
    }

    /// Train a forest drawing all sampling decisions from `rng`.
    ///
    /// Each round draws the row sample first, then the column sample.
    /// Without sampling nothing is drawn.
    pub fn train_with_rng<R: Rng + ?Sized>(&self, table: &TrainingTable, rng: &mut R) -> Forest {
        let features = table.features();
        let targets = table.targets();
        let n_rows = table.n_rows();
        let n_features = table.n_features();
        let n_trees = self.config.n_trees as usize;

        let cuts = BinCuts::from_features(features, self.config.max_bins as usize);
        let binned = cuts.bin_matrix(features);
        let grower = TreeGrower::new(
            &cuts,
            &binned,
            GrowerParams {
                max_depth: self.config.max_depth,
                learning_rate: self.config.learning_rate,
                gain: self.config.regularization.gain_params(),
            },
        );

        let row_sampler = RowSampler::new(n_rows, self.config.sampling.subsample);
        let col_sampler = ColSampler::new(n_features, self.config.sampling.colsample_bytree);

        let base_score = self.objective.base_score(targets);
        let mut predictions = Array1::from_elem(n_rows, base_score);
        let mut gradients = vec![GradientPair::ZERO; n_rows];
        let mut forest = Forest::new(base_score);

        let mut logger = TrainingLogger::new(self.config.verbosity);
        logger.start_training(n_trees, n_rows, n_features);

        for round in 0..n_trees {
            self.objective
                .compute_gradients(predictions.view(), targets, &mut gradients);

            let rows = row_sampler.sample(rng);
            let sampled_features = col_sampler.sample(rng);
            let tree = grower.grow(&gradients, rows, &sampled_features).freeze();

            if tree.n_nodes() == 1 {
                logger.warn(&format!("round {round}: no split improved the objective"));
            }

            // Sampled-out rows still move with the ensemble.
            for (pred, row) in predictions.iter_mut().zip(features.outer_iter()) {
                *pred += match row.as_slice() {
                    Some(values) => tree.predict_row(values),
                    None => tree.predict_row(&row.to_vec()),
                };
            }
            forest.push_tree(tree);

            if logger.wants_round(round) {
                let value = self.metric.compute(predictions.view(), targets);
                logger.log_round(round, self.metric.name(), value);
            }
        }

        logger.finish_training(forest.n_trees());
        forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::{Mae, SamplingParams};
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    fn table(features: Array2<f64>, targets: Array1<f64>) -> TrainingTable {
        let names = ["L", "W", "H", "DF"].map(String::from).to_vec();
        TrainingTable::new(names, features, "optimal_weight", targets).unwrap()
    }

    fn linear_table(n: usize) -> TrainingTable {
        let mut features = Array2::zeros((n, 4));
        let mut targets = Array1::zeros(n);
        for i in 0..n {
            let x = i as f64;
            features[[i, 0]] = x;
            features[[i, 1]] = (i % 7) as f64;
            features[[i, 2]] = (i % 3) as f64;
            features[[i, 3]] = 0.8;
            targets[i] = 2.0 * x + features[[i, 1]];
        }
        table(features, targets)
    }

    #[test]
    fn base_score_is_target_mean() {
        let data = table(
            array![[1.0, 1.0, 1.0, 1.0], [2.0, 1.0, 1.0, 1.0]],
            array![10.0, 20.0],
        );
        let config = TrainConfig::builder().n_trees(1).build().unwrap();
        let forest = GBDTTrainer::regression(config).train(&data);
        assert_abs_diff_eq!(forest.base_score(), 15.0);
        assert_eq!(forest.n_trees(), 1);
    }

    #[test]
    fn boosting_reduces_training_error() {
        let data = linear_table(200);
        let short = TrainConfig::builder().n_trees(1).build().unwrap();
        let long = TrainConfig::builder().n_trees(30).build().unwrap();

        let mae = |config: TrainConfig| {
            let forest = GBDTTrainer::regression(config).train(&data);
            Mae.compute(forest.predict(data.features()).view(), data.targets())
        };
        let (short_mae, long_mae) = (mae(short), mae(long));
        assert!(long_mae < 0.1 * short_mae, "{long_mae} vs {short_mae}");
    }

    #[test]
    fn training_is_deterministic() {
        let data = linear_table(120);
        let config = TrainConfig::builder()
            .n_trees(10)
            .sampling(SamplingParams {
                subsample: 0.7,
                colsample_bytree: 0.5,
            })
            .seed(11)
            .build()
            .unwrap();
        let trainer = GBDTTrainer::regression(config);
        assert_eq!(trainer.train(&data), trainer.train(&data));
    }

    #[test]
    fn sampling_depends_on_seed() {
        let data = linear_table(120);
        let forest = |seed| {
            let config = TrainConfig::builder()
                .n_trees(5)
                .sampling(SamplingParams {
                    subsample: 0.5,
                    colsample_bytree: 0.5,
                })
                .seed(seed)
                .build()
                .unwrap();
            GBDTTrainer::regression(config).train(&data)
        };
        assert_ne!(forest(1), forest(2));
    }

    #[test]
    fn trees_respect_max_depth_and_validate() {
        let data = linear_table(100);
        let config = TrainConfig::builder().n_trees(3).max_depth(2).build().unwrap();
        let forest = GBDTTrainer::regression(config).train(&data);
        assert!(forest.trees().all(|t| t.depth() <= 2));
        forest.validate(4).unwrap();
    }

    #[test]
    fn constant_target_yields_single_leaf_trees() {
        let data = table(Array2::ones((10, 4)), Array1::from_elem(10, 7.0));
        let config = TrainConfig::builder().n_trees(3).build().unwrap();
        let forest = GBDTTrainer::regression(config).train(&data);
        assert!(forest.trees().all(|t| t.n_nodes() == 1));
        assert_abs_diff_eq!(forest.predict_row(&[1.0, 1.0, 1.0, 1.0]), 7.0);
    }
}
