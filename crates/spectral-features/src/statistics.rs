//! Row-wise Reductions
//!
//! Every reduction maps a `(rows, n)` matrix to a `(rows, 1)` column so the
//! results line up with the per-observation layout of the feature catalog.

use crate::error::SpectralError;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Wrap a per-row vector as a `(rows, 1)` column
pub fn column(values: Array1<f64>) -> Array2<f64> {
    values.insert_axis(Axis(1))
}

/// Arithmetic mean of each row
pub fn mean(matrix: ArrayView2<f64>) -> Array2<f64> {
    let n = matrix.ncols() as f64;
    column(matrix.sum_axis(Axis(1)) / n)
}

/// Sum of each row
pub fn sum(matrix: ArrayView2<f64>) -> Array2<f64> {
    column(matrix.sum_axis(Axis(1)))
}

/// Maximum of each row
pub fn max(matrix: ArrayView2<f64>) -> Array2<f64> {
    column(matrix.map_axis(Axis(1), |row| {
        row.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }))
}

/// Root mean square of each row
pub fn rms(matrix: ArrayView2<f64>) -> Array2<f64> {
    let n = matrix.ncols() as f64;
    column(matrix.map_axis(Axis(1), |row| {
        (row.iter().map(|v| v * v).sum::<f64>() / n).sqrt()
    }))
}

/// Geometric mean of each row, computed in log space
pub fn geo_mean(matrix: ArrayView2<f64>) -> Array2<f64> {
    let n = matrix.ncols() as f64;
    column(matrix.map_axis(Axis(1), |row| {
        (row.iter().map(|v| v.ln()).sum::<f64>() / n).exp()
    }))
}

/// Divide every column of `matrix` by the matching row of `divisor`.
///
/// `divisor` must be a `(rows, 1)` column.
pub fn divide_rows(
    matrix: ArrayView2<f64>,
    divisor: ArrayView2<f64>,
) -> Result<Array2<f64>, SpectralError> {
    if divisor.ncols() != 1 {
        return Err(SpectralError::TooFewColumns {
            feature: "row divisor",
            required: 1,
            actual: divisor.ncols(),
        });
    }
    if matrix.nrows() != divisor.nrows() {
        return Err(SpectralError::RowMismatch {
            left: matrix.nrows(),
            right: divisor.nrows(),
        });
    }
    Ok(&matrix / &divisor)
}
