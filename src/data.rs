//! Training-data validation and preparation.
//!
//! Datasets are dense `(n_features, n_samples)` matrices with one sample per
//! column, paired with a label slice of class indices. The helpers here
//! validate that pairing, append the constant intercept row, and build the
//! one-hot ground-truth matrix the objective consumes.

use ndarray::{s, Array2, ArrayView2};

/// Dataset validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataError {
    #[error("number of labels ({labels}) does not match number of samples ({samples})")]
    LabelCountMismatch { samples: usize, labels: usize },

    #[error("label {label} of sample {sample} is out of range for {num_classes} classes")]
    LabelOutOfRange {
        sample: usize,
        label: usize,
        num_classes: usize,
    },

    #[error("dataset contains no samples")]
    EmptyDataset,
}

/// Validate a dataset/label pairing against a class count.
///
/// Checks that the dataset is non-empty, that there is exactly one label per
/// column, and that every label is below `num_classes`.
pub fn validate(
    data: ArrayView2<f64>,
    labels: &[usize],
    num_classes: usize,
) -> Result<(), DataError> {
    let samples = data.ncols();
    if samples == 0 {
        return Err(DataError::EmptyDataset);
    }
    if labels.len() != samples {
        return Err(DataError::LabelCountMismatch {
            samples,
            labels: labels.len(),
        });
    }
    for (sample, &label) in labels.iter().enumerate() {
        if label >= num_classes {
            return Err(DataError::LabelOutOfRange {
                sample,
                label,
                num_classes,
            });
        }
    }
    Ok(())
}

/// Append a constant row of ones so each class gets an offset term.
pub fn augment_intercept(data: ArrayView2<f64>) -> Array2<f64> {
    let (rows, cols) = data.dim();
    let mut augmented = Array2::ones((rows + 1, cols));
    augmented.slice_mut(s![..rows, ..]).assign(&data);
    augmented
}

/// One-hot ground-truth matrix of shape `(num_classes, n_samples)`.
///
/// Column `i` has a single `1.0` at row `labels[i]`.
pub fn one_hot(labels: &[usize], num_classes: usize) -> Array2<f64> {
    let mut ground_truth = Array2::zeros((num_classes, labels.len()));
    for (sample, &label) in labels.iter().enumerate() {
        ground_truth[[label, sample]] = 1.0;
    }
    ground_truth
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn validate_accepts_consistent_input() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(validate(data.view(), &[0, 1], 2).is_ok());
    }

    #[test]
    fn validate_rejects_label_count_mismatch() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let err = validate(data.view(), &[0], 2).unwrap_err();
        assert!(matches!(
            err,
            DataError::LabelCountMismatch {
                samples: 2,
                labels: 1
            }
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_label() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let err = validate(data.view(), &[0, 2], 2).unwrap_err();
        assert!(matches!(
            err,
            DataError::LabelOutOfRange {
                sample: 1,
                label: 2,
                num_classes: 2
            }
        ));
    }

    #[test]
    fn validate_rejects_empty_dataset() {
        let data = Array2::<f64>::zeros((3, 0));
        let err = validate(data.view(), &[], 2).unwrap_err();
        assert!(matches!(err, DataError::EmptyDataset));
    }

    #[test]
    fn augment_appends_ones_row() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let augmented = augment_intercept(data.view());
        assert_eq!(augmented, array![[1.0, 2.0], [3.0, 4.0], [1.0, 1.0]]);
    }

    #[test]
    fn one_hot_marks_label_rows() {
        let ground_truth = one_hot(&[1, 0, 2], 3);
        assert_eq!(
            ground_truth,
            array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }
}
