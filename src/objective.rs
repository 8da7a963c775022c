//! Regularized softmax objective function.
//!
//! [`SoftmaxObjective`] is bound at construction to a dataset, its labels,
//! a class count, and a regularization strength; it then evaluates the
//! L2-regularized negative log-likelihood
//!
//! ```text
//! J(W) = -(1/n) Σ_i log P(y_i | x_i, W) + (λ/2) ‖W‖_F²
//! ```
//!
//! and its gradient for candidate parameter matrices `W` of shape
//! `(num_classes, effective_dim)`. All computations are vectorized over the
//! whole batch: one evaluation is a single pass over the dataset.
//!
//! Scores are stabilized by subtracting the per-column maximum before
//! exponentiation, and the objective value goes through log-sum-exp rather
//! than `log(softmax)`, so both value and gradient stay finite for arbitrary
//! finite `W`.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;

use crate::data::{self, DataError};
use crate::optimize::DifferentiableFunction;

/// Scale of the zero-centered random parameter initialization.
const INIT_SCALE: f64 = 0.005;

/// Regularized negative log-likelihood of a softmax model over a fixed
/// dataset.
///
/// The dataset (augmented with an intercept row when requested) and the
/// one-hot ground-truth matrix are precomputed once at construction; every
/// [`evaluate`](DifferentiableFunction::evaluate) /
/// [`gradient`](DifferentiableFunction::gradient) call reuses them.
#[derive(Debug, Clone)]
pub struct SoftmaxObjective {
    /// Feature matrix, `(effective_dim, n_samples)`. Includes the constant
    /// ones row when the intercept is fit.
    data: Array2<f64>,

    /// One-hot labels, `(num_classes, n_samples)`.
    ground_truth: Array2<f64>,

    num_classes: usize,
    lambda: f64,
    fit_intercept: bool,
}

impl SoftmaxObjective {
    /// Bind an objective to a dataset.
    ///
    /// # Arguments
    ///
    /// * `data` - Features, one sample per column
    /// * `labels` - One class index per sample
    /// * `num_classes` - Number of classes
    /// * `lambda` - L2 regularization strength
    /// * `fit_intercept` - Whether to append a constant ones row
    ///
    /// Fails when the labels do not pair up with the columns of `data` or a
    /// label is out of range.
    pub fn new(
        data: ArrayView2<f64>,
        labels: &[usize],
        num_classes: usize,
        lambda: f64,
        fit_intercept: bool,
    ) -> Result<Self, DataError> {
        data::validate(data, labels, num_classes)?;

        let data = if fit_intercept {
            data::augment_intercept(data)
        } else {
            data.to_owned()
        };

        Ok(Self {
            ground_truth: data::one_hot(labels, num_classes),
            data,
            num_classes,
            lambda,
            fit_intercept,
        })
    }

    /// Number of samples in the bound dataset.
    pub fn num_samples(&self) -> usize {
        self.data.ncols()
    }

    /// Parameter columns: feature dimension plus one when the intercept is
    /// fit.
    pub fn effective_dim(&self) -> usize {
        self.data.nrows()
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// L2 regularization strength.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Whether the bound dataset carries an intercept row.
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Random starting point at this objective's parameter shape.
    pub fn initial_parameters<R: Rng + ?Sized>(&self, rng: &mut R) -> Array2<f64> {
        initialize_parameters(self.num_classes, self.effective_dim(), rng)
    }

    /// Raw class scores `W · X`, `(num_classes, n_samples)`.
    fn scores(&self, parameters: &Array2<f64>) -> Array2<f64> {
        parameters.dot(&self.data)
    }

    fn value_from(&self, log_probabilities: &Array2<f64>, parameters: &Array2<f64>) -> f64 {
        let n = self.num_samples() as f64;
        let log_likelihood = (&self.ground_truth * log_probabilities).sum() / n;
        let regularization = 0.5 * self.lambda * parameters.mapv(|w| w * w).sum();
        -log_likelihood + regularization
    }

    fn gradient_from(&self, probabilities: &Array2<f64>, parameters: &Array2<f64>) -> Array2<f64> {
        let n = self.num_samples() as f64;
        let residual = &self.ground_truth - probabilities;
        residual.dot(&self.data.t()) * (-1.0 / n) + parameters * self.lambda
    }
}

impl DifferentiableFunction for SoftmaxObjective {
    fn evaluate(&self, params: &Array2<f64>) -> f64 {
        let scores = self.scores(params);
        self.value_from(&log_softmax_columns(&scores), params)
    }

    fn gradient(&self, params: &Array2<f64>) -> Array2<f64> {
        let scores = self.scores(params);
        self.gradient_from(&softmax_columns(&scores), params)
    }

    fn evaluate_with_gradient(&self, params: &Array2<f64>) -> (f64, Array2<f64>) {
        let scores = self.scores(params);
        let shifted = &scores - &column_max(&scores);
        let exp = shifted.mapv(f64::exp);
        let sums = exp.sum_axis(Axis(0));

        let probabilities = &exp / &sums;
        let log_probabilities = shifted - &sums.mapv(f64::ln);

        (
            self.value_from(&log_probabilities, params),
            self.gradient_from(&probabilities, params),
        )
    }
}

/// Zero-centered uniform random parameters in `(-0.005, 0.005)`, shape
/// `(num_classes, dim)`.
pub fn initialize_parameters<R: Rng + ?Sized>(
    num_classes: usize,
    dim: usize,
    rng: &mut R,
) -> Array2<f64> {
    Array2::from_shape_simple_fn((num_classes, dim), || rng.gen_range(-INIT_SCALE..INIT_SCALE))
}

/// Per-column maximum of a score matrix.
fn column_max(scores: &Array2<f64>) -> Array1<f64> {
    scores.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| acc.max(v))
}

/// Column-wise stabilized softmax of a `(num_classes, n_samples)` score
/// matrix. Every column sums to 1.
pub(crate) fn softmax_columns(scores: &Array2<f64>) -> Array2<f64> {
    let mut probabilities = scores - &column_max(scores);
    probabilities.mapv_inplace(f64::exp);
    let sums = probabilities.sum_axis(Axis(0));
    probabilities / &sums
}

/// Column-wise log-softmax via log-sum-exp. Finite for any finite scores.
fn log_softmax_columns(scores: &Array2<f64>) -> Array2<f64> {
    let shifted = scores - &column_max(scores);
    let log_sums = shifted.mapv(f64::exp).sum_axis(Axis(0)).mapv(f64::ln);
    shifted - &log_sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn toy_objective(lambda: f64, fit_intercept: bool) -> SoftmaxObjective {
        let data = array![
            [1.0, 0.0, 1.0, 0.5],
            [0.0, 1.0, 1.0, -0.5],
            [0.3, -0.2, 0.0, 1.0]
        ];
        SoftmaxObjective::new(data.view(), &[0, 1, 2, 0], 3, lambda, fit_intercept).unwrap()
    }

    #[test]
    fn zero_parameters_give_uniform_likelihood() {
        let objective = toy_objective(0.0, false);
        let params = Array2::zeros((3, 3));

        // Uniform probabilities: J = ln(num_classes).
        assert_approx_eq!(objective.evaluate(&params), 3.0f64.ln(), 1e-12);
    }

    #[test]
    fn regularization_adds_half_lambda_norm() {
        let lambda = 0.7;
        let plain = toy_objective(0.0, true);
        let regularized = toy_objective(lambda, true);
        let params = array![
            [0.2, -0.1, 0.4, 0.3],
            [-0.5, 0.6, 0.1, -0.2],
            [0.0, 0.3, -0.4, 0.1]
        ];

        let penalty = 0.5 * lambda * params.mapv(|w| w * w).sum();
        assert_approx_eq!(
            regularized.evaluate(&params),
            plain.evaluate(&params) + penalty,
            1e-12
        );
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let objective = toy_objective(0.1, true);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut params = objective.initial_parameters(&mut rng);
        // Move away from the origin so the check is not trivially symmetric.
        params.mapv_inplace(|w| w * 100.0 + 0.01);

        let analytic = objective.gradient(&params);
        let epsilon = 1e-6;

        for row in 0..params.nrows() {
            for col in 0..params.ncols() {
                let mut plus = params.clone();
                plus[[row, col]] += epsilon;
                let mut minus = params.clone();
                minus[[row, col]] -= epsilon;

                let numeric =
                    (objective.evaluate(&plus) - objective.evaluate(&minus)) / (2.0 * epsilon);
                assert_approx_eq!(analytic[[row, col]], numeric, 1e-5);
            }
        }
    }

    #[test]
    fn combined_evaluation_matches_separate_calls() {
        let objective = toy_objective(0.05, true);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let params = objective.initial_parameters(&mut rng);

        let (value, gradient) = objective.evaluate_with_gradient(&params);

        assert_approx_eq!(value, objective.evaluate(&params), 1e-12);
        let separate = objective.gradient(&params);
        for (a, b) in gradient.iter().zip(separate.iter()) {
            assert_approx_eq!(*a, *b, 1e-12);
        }
    }

    #[test]
    fn finite_for_large_parameters() {
        let data = array![[1.0e3, -1.0e3], [-1.0e3, 1.0e3]];
        let objective = SoftmaxObjective::new(data.view(), &[0, 1], 2, 0.01, false).unwrap();
        let params = array![[1.0e3, -1.0e3], [-1.0e3, 1.0e3]];

        let (value, gradient) = objective.evaluate_with_gradient(&params);

        assert!(value.is_finite());
        assert!(gradient.iter().all(|g| g.is_finite()));
    }

    #[test]
    fn softmax_columns_normalize_and_stay_stable() {
        let scores = array![[1.0e3, -2.0], [1.001e3, 0.0], [999.0, 3.0]];
        let probabilities = softmax_columns(&scores);

        for column in probabilities.axis_iter(Axis(1)) {
            assert_approx_eq!(column.sum(), 1.0, 1e-12);
            assert!(column.iter().all(|p| p.is_finite() && *p >= 0.0));
        }
    }

    #[test]
    fn initialization_is_small_and_zero_centered() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let params = initialize_parameters(4, 10, &mut rng);

        assert_eq!(params.dim(), (4, 10));
        assert!(params.iter().all(|w| w.abs() < INIT_SCALE));
        assert!(params.iter().any(|&w| w != 0.0));
    }

    #[test]
    fn rejects_invalid_labels() {
        let data = array![[1.0, 2.0]];
        assert!(SoftmaxObjective::new(data.view(), &[0, 5], 3, 0.0, false).is_err());
    }
}
