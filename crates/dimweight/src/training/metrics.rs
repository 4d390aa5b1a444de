//! Regression metrics.

use ndarray::ArrayView1;

/// Scores predictions against targets.
pub trait MetricFn {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64;

    /// Whether higher values indicate better performance.
    fn higher_is_better(&self) -> bool;

    /// Name of the metric (for logging).
    fn name(&self) -> &'static str;
}

/// Root Mean Squared Error: `sqrt(mean((pred - y)²))`. Lower is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl MetricFn for Rmse {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        let n = predictions.len();
        if n == 0 {
            return 0.0;
        }
        let sum_sq: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(p, y)| (p - y) * (p - y))
            .sum();
        (sum_sq / n as f64).sqrt()
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}

/// Mean Absolute Error: `mean(|pred - y|)`. Lower is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl MetricFn for Mae {
    fn compute(&self, predictions: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
        let n = predictions.len();
        if n == 0 {
            return 0.0;
        }
        let sum_abs: f64 = predictions.iter().zip(targets).map(|(p, y)| (p - y).abs()).sum();
        sum_abs / n as f64
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "mae"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, array};

    #[test]
    fn rmse_known_value() {
        let preds = array![1.0, 2.0, 3.0, 4.0];
        let targets = array![1.0, 4.0, 3.0, 0.0];
        // squared errors 0, 4, 0, 16 -> mean 5
        assert_abs_diff_eq!(Rmse.compute(preds.view(), targets.view()), 5f64.sqrt());
    }

    #[test]
    fn mae_known_value() {
        let preds = array![1.0, 2.0, 3.0, 4.0];
        let targets = array![1.0, 4.0, 3.0, 0.0];
        assert_abs_diff_eq!(Mae.compute(preds.view(), targets.view()), 1.5);
    }

    #[test]
    fn empty_inputs_score_zero() {
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(Rmse.compute(empty.view(), empty.view()), 0.0);
        assert_eq!(Mae.compute(empty.view(), empty.view()), 0.0);
    }

    #[test]
    fn metric_metadata() {
        assert_eq!(Rmse.name(), "rmse");
        assert_eq!(Mae.name(), "mae");
        assert!(!Rmse.higher_is_better());
        assert!(!Mae.higher_is_better());
    }
}
