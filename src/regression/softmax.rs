//! Softmax regression model and trainer.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::data::{self, DataError};
use crate::objective::{self, SoftmaxObjective};
use crate::optimize::Minimizer;

/// Default L2 regularization strength.
const DEFAULT_LAMBDA: f64 = 1e-4;

/// Errors surfaced by [`SoftmaxRegression`] operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SoftmaxError {
    /// The training or evaluation inputs are inconsistent.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A point or batch does not match the model's feature dimension.
    #[error("input has {got} features but the model expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Multi-class linear classifier fit by minimizing a regularized softmax
/// objective.
///
/// The model owns a `(num_classes, feature_size + intercept)` parameter
/// matrix; row `k` is the weight vector of class `k`. Parameters start out
/// zeroed: classification before a successful [`train`](Self::train) is
/// well-defined but meaningless (every sample gets class 0).
///
/// # Example
///
/// ```ignore
/// use multinom::{GradientDescent, SoftmaxRegression};
///
/// let minimizer = GradientDescent::default();
/// let model = SoftmaxRegression::fit(data.view(), &labels, 3, 1e-4, true, &minimizer)?;
/// let predictions = model.classify(test.view())?;
/// let accuracy = model.compute_accuracy(test.view(), &test_labels)?;
/// ```
#[derive(Debug, Clone)]
pub struct SoftmaxRegression {
    /// Parameters after optimization, one row per class.
    parameters: Array2<f64>,
    num_classes: usize,
    lambda: f64,
    fit_intercept: bool,
}

impl SoftmaxRegression {
    /// Create an untrained model with parameters of the right shape.
    ///
    /// Use [`train`](Self::train) before classifying, otherwise the output
    /// is meaningless.
    pub fn new(input_size: usize, num_classes: usize, fit_intercept: bool) -> Self {
        let dim = input_size + usize::from(fit_intercept);
        Self {
            parameters: Array2::zeros((num_classes, dim)),
            num_classes,
            lambda: DEFAULT_LAMBDA,
            fit_intercept,
        }
    }

    /// Rebuild a model from its serialized parts.
    pub fn from_parts(
        parameters: Array2<f64>,
        num_classes: usize,
        lambda: f64,
        fit_intercept: bool,
    ) -> Self {
        Self {
            parameters,
            num_classes,
            lambda,
            fit_intercept,
        }
    }

    /// Train a model on the given dataset.
    ///
    /// # Arguments
    ///
    /// * `data` - Features, one sample per column
    /// * `labels` - One class index per sample
    /// * `num_classes` - Number of classes
    /// * `lambda` - L2 regularization strength
    /// * `fit_intercept` - Whether to fit a per-class offset term
    /// * `minimizer` - Any conforming [`Minimizer`]
    pub fn fit<M: Minimizer>(
        data: ArrayView2<f64>,
        labels: &[usize],
        num_classes: usize,
        lambda: f64,
        fit_intercept: bool,
        minimizer: &M,
    ) -> Result<Self, SoftmaxError> {
        let mut model = Self::new(data.nrows(), num_classes, fit_intercept);
        model.lambda = lambda;
        model.train(data, labels, num_classes, minimizer)?;
        Ok(model)
    }

    /// Train (or re-train) on the given dataset, returning the final
    /// objective value.
    ///
    /// When the stored parameters already have the shape requested by
    /// `num_classes` and the data dimension, optimization warm-starts from
    /// them; otherwise they are reinitialized with small zero-centered
    /// random values first. Invalid inputs fail before any state changes,
    /// leaving the parameters at their prior value.
    pub fn train<M: Minimizer>(
        &mut self,
        data: ArrayView2<f64>,
        labels: &[usize],
        num_classes: usize,
        minimizer: &M,
    ) -> Result<f64, SoftmaxError> {
        let objective =
            SoftmaxObjective::new(data, labels, num_classes, self.lambda, self.fit_intercept)?;

        let shape = (num_classes, objective.effective_dim());
        let trained = self.parameters.iter().any(|&w| w != 0.0);
        let initial = if self.parameters.dim() == shape && trained {
            // Warm start from the previous solution.
            self.parameters.clone()
        } else {
            objective.initial_parameters(&mut rand::thread_rng())
        };

        let outcome = minimizer.minimize(&objective, initial);
        self.parameters = outcome.parameters;
        self.num_classes = num_classes;
        Ok(outcome.objective)
    }

    /// Predict a class label for every column of `data`.
    ///
    /// Labels are the arg-max of the per-class scores; ties resolve to the
    /// lowest class index.
    pub fn classify(&self, data: ArrayView2<f64>) -> Result<Vec<usize>, SoftmaxError> {
        let scores = self.scores(data)?;
        Ok(scores.axis_iter(Axis(1)).map(argmax).collect())
    }

    /// Predict the class label of a single point.
    pub fn classify_point(&self, point: ArrayView1<f64>) -> Result<usize, SoftmaxError> {
        if point.len() != self.feature_size() {
            return Err(SoftmaxError::DimensionMismatch {
                expected: self.feature_size(),
                got: point.len(),
            });
        }
        let labels = self.classify(point.insert_axis(Axis(1)))?;
        Ok(labels[0])
    }

    /// Predict labels together with the full class-probability matrix
    /// (`num_classes` × `n_samples`, columns summing to 1).
    pub fn classify_with_probabilities(
        &self,
        data: ArrayView2<f64>,
    ) -> Result<(Vec<usize>, Array2<f64>), SoftmaxError> {
        let probabilities = self.probabilities(data)?;
        let labels = probabilities.axis_iter(Axis(1)).map(argmax).collect();
        Ok((labels, probabilities))
    }

    /// Class-probability matrix for every column of `data`.
    pub fn probabilities(&self, data: ArrayView2<f64>) -> Result<Array2<f64>, SoftmaxError> {
        let scores = self.scores(data)?;
        Ok(objective::softmax_columns(&scores))
    }

    /// Percentage of correctly classified samples, in `[0, 100]`.
    ///
    /// An empty dataset is rejected with
    /// [`DataError::EmptyDataset`] rather than reported as 0%.
    pub fn compute_accuracy(
        &self,
        data: ArrayView2<f64>,
        labels: &[usize],
    ) -> Result<f64, SoftmaxError> {
        if data.ncols() == 0 {
            return Err(DataError::EmptyDataset.into());
        }
        if labels.len() != data.ncols() {
            return Err(DataError::LabelCountMismatch {
                samples: data.ncols(),
                labels: labels.len(),
            }
            .into());
        }

        let predictions = self.classify(data)?;
        let correct = predictions
            .iter()
            .zip(labels)
            .filter(|(predicted, actual)| predicted == actual)
            .count();
        Ok(correct as f64 / labels.len() as f64 * 100.0)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Set the number of classes.
    ///
    /// Affects only the next [`train`](Self::train) call, which reinitializes
    /// the parameter matrix when the requested shape differs.
    pub fn set_num_classes(&mut self, num_classes: usize) {
        self.num_classes = num_classes;
    }

    /// L2 regularization strength.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Set the L2 regularization strength used by future training.
    pub fn set_lambda(&mut self, lambda: f64) {
        self.lambda = lambda;
    }

    /// Whether an intercept term is fit. Fixed at construction: toggling it
    /// would change the parameter shape.
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Model parameters, one row per class.
    pub fn parameters(&self) -> &Array2<f64> {
        &self.parameters
    }

    /// Overwrite the model parameters.
    ///
    /// The caller is responsible for supplying a
    /// `(num_classes, feature_size + intercept)` matrix.
    pub fn set_parameters(&mut self, parameters: Array2<f64>) {
        self.parameters = parameters;
    }

    /// Feature dimension of the training data, excluding the intercept
    /// column.
    pub fn feature_size(&self) -> usize {
        self.parameters.ncols() - usize::from(self.fit_intercept)
    }

    /// Raw class scores for a batch, checking the feature dimension.
    fn scores(&self, data: ArrayView2<f64>) -> Result<Array2<f64>, SoftmaxError> {
        if data.nrows() != self.feature_size() {
            return Err(SoftmaxError::DimensionMismatch {
                expected: self.feature_size(),
                got: data.nrows(),
            });
        }
        let data = if self.fit_intercept {
            data::augment_intercept(data)
        } else {
            data.to_owned()
        };
        Ok(self.parameters.dot(&data))
    }
}

/// Index of the maximum score; the lowest index wins ties.
fn argmax(column: ArrayView1<f64>) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (index, &score) in column.iter().enumerate() {
        if score > best_score {
            best = index;
            best_score = score;
        }
    }
    best
}
