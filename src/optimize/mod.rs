//! Numerical minimization of differentiable matrix-shaped objectives.
//!
//! [`DifferentiableFunction`] is the contract an objective exposes to a
//! minimizer: value, gradient, and an optional combined evaluation for
//! implementations that share work between the two. [`Minimizer`] is the
//! capability consumed by training code; any conforming algorithm (L-BFGS,
//! gradient descent variants) can be substituted without touching the
//! trainer or the objective.

mod gradient_descent;

pub use gradient_descent::{GradientDescent, GradientDescentParams};

use ndarray::Array2;

/// A differentiable scalar objective over a matrix-shaped parameter space.
///
/// Implementations must be pure: the same parameters always produce the same
/// value and gradient, with no side effects.
pub trait DifferentiableFunction {
    /// Objective value at `params`.
    fn evaluate(&self, params: &Array2<f64>) -> f64;

    /// Gradient at `params`, with the same shape as `params`.
    fn gradient(&self, params: &Array2<f64>) -> Array2<f64>;

    /// Value and gradient in one pass.
    ///
    /// Override when the two computations share intermediate results.
    fn evaluate_with_gradient(&self, params: &Array2<f64>) -> (f64, Array2<f64>) {
        (self.evaluate(params), self.gradient(params))
    }
}

/// Result of a minimization run.
#[derive(Debug, Clone)]
pub struct MinimizeOutcome {
    /// Parameters at the final point.
    pub parameters: Array2<f64>,

    /// Objective value at the final point.
    pub objective: f64,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Whether the run stopped on the tolerance criterion rather than the
    /// iteration cap.
    pub converged: bool,
}

/// A gradient-based minimizer over [`DifferentiableFunction`]s.
///
/// Takes an objective and an initial point, returns the final point and
/// objective value. Iteration caps and tolerances are the minimizer's own
/// configuration, not the caller's.
pub trait Minimizer {
    fn minimize<F: DifferentiableFunction>(
        &self,
        function: &F,
        initial: Array2<f64>,
    ) -> MinimizeOutcome;
}
