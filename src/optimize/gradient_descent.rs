//! Full-batch gradient descent with step halving.
//!
//! Reference [`Minimizer`] implementation: descends along the negative
//! gradient with a fixed base step, halving the step whenever it would
//! increase the objective, and stops once the per-iteration improvement
//! falls below a tolerance.

use log::{debug, info};
use ndarray::Array2;

use super::{DifferentiableFunction, MinimizeOutcome, Minimizer};

/// Smallest step worth attempting before declaring the point stationary.
const MIN_STEP: f64 = 1e-15;

/// Parameters for gradient descent.
///
/// Use struct construction with `..Default::default()` for convenient
/// configuration.
#[derive(Debug, Clone)]
pub struct GradientDescentParams {
    /// Maximum number of iterations.
    pub max_iterations: usize,

    /// Base step size. Each iteration starts from this step and halves it
    /// until the objective no longer increases.
    pub step_size: f64,

    /// Convergence tolerance on the per-iteration objective decrease.
    pub tolerance: f64,
}

impl Default for GradientDescentParams {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            step_size: 0.5,
            tolerance: 1e-10,
        }
    }
}

/// Full-batch gradient descent minimizer.
#[derive(Debug, Clone, Default)]
pub struct GradientDescent {
    params: GradientDescentParams,
}

impl GradientDescent {
    /// Create a minimizer with the given parameters.
    pub fn new(params: GradientDescentParams) -> Self {
        Self { params }
    }
}

impl Minimizer for GradientDescent {
    fn minimize<F: DifferentiableFunction>(
        &self,
        function: &F,
        initial: Array2<f64>,
    ) -> MinimizeOutcome {
        let mut parameters = initial;
        let (mut value, mut grad) = function.evaluate_with_gradient(&parameters);
        let mut iterations = 0;
        let mut converged = false;

        for iteration in 0..self.params.max_iterations {
            let mut step = self.params.step_size;
            let mut candidate = &parameters - &grad.mapv(|g| g * step);
            let mut candidate_value = function.evaluate(&candidate);

            // Halve the step until the objective stops increasing.
            while candidate_value > value && step > MIN_STEP {
                step *= 0.5;
                candidate = &parameters - &grad.mapv(|g| g * step);
                candidate_value = function.evaluate(&candidate);
            }

            if candidate_value > value {
                // No representable step decreases the objective.
                converged = true;
                break;
            }

            let decrease = value - candidate_value;
            parameters = candidate;
            value = candidate_value;
            iterations = iteration + 1;
            debug!("iteration {iterations}: objective {value:.6e} (step {step:.3e})");

            if decrease < self.params.tolerance {
                info!("converged after {iterations} iterations, objective {value:.6e}");
                converged = true;
                break;
            }

            grad = function.gradient(&parameters);
        }

        MinimizeOutcome {
            parameters,
            objective: value,
            iterations,
            converged,
        }
    }
}
