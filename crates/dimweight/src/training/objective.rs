//! Training objectives.

use ndarray::ArrayView1;

/// First and second derivative of the loss for one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradientPair {
    pub grad: f64,
    pub hess: f64,
}

impl GradientPair {
    pub const ZERO: Self = Self { grad: 0.0, hess: 0.0 };

    #[inline]
    pub fn new(grad: f64, hess: f64) -> Self {
        Self { grad, hess }
    }
}

/// A differentiable loss the trainer can boost.
pub trait ObjectiveFn {
    /// Name recorded in the model artifact.
    fn name(&self) -> &'static str;

    /// Optimal constant prediction before any tree.
    fn base_score(&self, targets: ArrayView1<'_, f64>) -> f64;

    /// Fill `out[i]` with the gradient pair of sample `i`.
    fn compute_gradients(
        &self,
        predictions: ArrayView1<'_, f64>,
        targets: ArrayView1<'_, f64>,
        out: &mut [GradientPair],
    );
}

/// Squared error `½(pred − y)²`: gradient `pred − y`, hessian `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredLoss;

impl SquaredLoss {
    pub const NAME: &'static str = "reg:squarederror";
}

impl ObjectiveFn for SquaredLoss {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn base_score(&self, targets: ArrayView1<'_, f64>) -> f64 {
        targets.mean().unwrap_or(0.0)
    }

    fn compute_gradients(
        &self,
        predictions: ArrayView1<'_, f64>,
        targets: ArrayView1<'_, f64>,
        out: &mut [GradientPair],
    ) {
        debug_assert_eq!(predictions.len(), targets.len());
        debug_assert_eq!(predictions.len(), out.len());
        for ((pair, &pred), &target) in out.iter_mut().zip(predictions).zip(targets) {
            *pair = GradientPair::new(pred - target, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn base_score_is_target_mean() {
        let targets = array![1.0, 2.0, 6.0];
        assert_abs_diff_eq!(SquaredLoss.base_score(targets.view()), 3.0);
    }

    #[test]
    fn squared_loss_gradients() {
        let preds = array![1.0, 5.0];
        let targets = array![3.0, 2.0];
        let mut out = vec![GradientPair::ZERO; 2];
        SquaredLoss.compute_gradients(preds.view(), targets.view(), &mut out);
        assert_eq!(out, vec![GradientPair::new(-2.0, 1.0), GradientPair::new(3.0, 1.0)]);
    }
}
