//! Softmax regression classifier.
//!
//! - [`SoftmaxRegression`]: multi-class linear classifier with training,
//!   batch/single-point classification, probability output, and accuracy
//!   computation
//! - [`SoftmaxError`]: errors surfaced at the classifier API boundary

mod softmax;

pub use softmax::{SoftmaxError, SoftmaxRegression};
