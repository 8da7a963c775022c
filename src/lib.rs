//! multinom: multinomial softmax regression for Rust.
//!
//! A multi-class linear classifier fit by numerical minimization of a
//! regularized negative log-likelihood, plus the exponential loss primitive
//! used by adaboost-style ensemble regressors.
//!
//! # Key Types
//!
//! - [`SoftmaxRegression`] - Classifier with train/classify/accuracy
//! - [`SoftmaxObjective`] - Regularized objective value and gradient
//! - [`Minimizer`] / [`DifferentiableFunction`] - Optimizer contract
//! - [`GradientDescent`] - Reference minimizer
//! - [`ExponentialLoss`] - Elementwise boosting loss transform
//!
//! # Training
//!
//! Call [`SoftmaxRegression::fit`] with any [`Minimizer`]; it binds a
//! [`SoftmaxObjective`] to the training data, minimizes it, and stores the
//! final parameter matrix. The trained model then classifies batches
//! (columns of a features × samples matrix) or single points.
//!
//! # Conventions
//!
//! Data matrices hold one sample per column. Parameters have one row per
//! class. Labels are `usize` class indices in `[0, num_classes)`.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod io;
pub mod loss;
pub mod objective;
pub mod optimize;
pub mod regression;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::DataError;
pub use io::{RecordError, SoftmaxRegressionRecord, FORMAT_VERSION};
pub use loss::ExponentialLoss;
pub use objective::SoftmaxObjective;
pub use optimize::{
    DifferentiableFunction, GradientDescent, GradientDescentParams, MinimizeOutcome, Minimizer,
};
pub use regression::{SoftmaxError, SoftmaxRegression};
