//! Loss primitives for ensemble boosting.

use ndarray::{Array1, ArrayView1};

/// Exponential loss for adaboost-style regressors.
///
/// Elementwise transform `loss_i = 1 - exp(-|e_i| / max_error)` where
/// `max_error` is the *signed* maximum of the error vector, substituted with
/// `1` when it is exactly `0`. The denominator deliberately uses the signed
/// maximum rather than the maximum magnitude: an all-negative error vector
/// scales by a negative denominator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialLoss;

impl ExponentialLoss {
    /// Compute the loss vector for a vector of prediction errors.
    pub fn calculate(errors: ArrayView1<f64>) -> Array1<f64> {
        let mut max_error = errors.fold(f64::NEG_INFINITY, |acc, &e| acc.max(e));
        // To avoid dividing by zero
        if max_error == 0.0 {
            max_error = 1.0;
        }
        errors.mapv(|e| 1.0 - (-e.abs() / max_error).exp())
    }
}
