//! Testing utilities for multinom.
//!
//! Assertion helpers and tiny datasets shared between unit tests and the
//! integration tests under `tests/`.
//!
//! ```ignore
//! use multinom::testing::{separable_two_class, DEFAULT_TOLERANCE};
//! use multinom::assert_approx_eq;
//! ```

use ndarray::{array, Array2};

use approx::AbsDiffEq;

/// Default tolerance for floating point comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use multinom::assert_approx_eq;
/// assert_approx_eq!(1.0f64, 1.0001f64, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Whether two matrices agree elementwise within `tolerance`.
pub fn matrices_approx_eq(a: &Array2<f64>, b: &Array2<f64>, tolerance: f64) -> bool {
    a.dim() == b.dim()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.abs_diff_eq(y, tolerance))
}

/// Three-point linearly separable two-class dataset:
/// `(1,0) -> 0`, `(0,1) -> 1`, `(1,1) -> 0`.
pub fn separable_two_class() -> (Array2<f64>, Vec<usize>) {
    let data = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0]];
    (data, vec![0, 1, 0])
}

/// Nine-point separable three-class dataset: axis-aligned 2D blobs around
/// `(0,0)`, `(4,0)`, and `(0,4)`.
pub fn three_class_blobs() -> (Array2<f64>, Vec<usize>) {
    let data = array![
        [0.0, 0.2, -0.1, 4.0, 4.2, 3.9, 0.1, -0.2, 0.0],
        [0.0, -0.1, 0.2, 0.0, 0.1, -0.2, 4.0, 4.1, 3.8]
    ];
    let labels = vec![0, 0, 0, 1, 1, 1, 2, 2, 2];
    (data, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_macro_accepts_close_values() {
        assert_approx_eq!(1.0, 1.0 + 1e-12, 1e-9);
    }

    #[test]
    #[should_panic]
    fn approx_eq_macro_rejects_distant_values() {
        assert_approx_eq!(1.0, 2.0, 1e-9);
    }

    #[test]
    fn matrices_compare_shape_and_values() {
        let a = array![[1.0, 2.0]];
        let b = array![[1.0, 2.0 + 1e-12]];
        let c = array![[1.0], [2.0]];

        assert!(matrices_approx_eq(&a, &b, 1e-9));
        assert!(!matrices_approx_eq(&a, &c, 1e-9));
    }

    #[test]
    fn fixture_shapes_are_consistent() {
        let (data, labels) = separable_two_class();
        assert_eq!(data.ncols(), labels.len());

        let (data, labels) = three_class_blobs();
        assert_eq!(data.ncols(), labels.len());
    }
}
