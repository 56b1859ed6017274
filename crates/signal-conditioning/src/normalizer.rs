//! Row-wise Normalization of Sample Batches

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest spread used as a divisor, keeps flat rows finite
const MIN_SPREAD: f64 = 0.0001;

/// Normalization method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    /// Subtract the row mean and divide by the row standard deviation
    #[default]
    ZScore,
    /// Subtract the row mean only
    Center,
    /// Min-max normalization to [0, 1]
    MinMax,
    /// No normalization
    None,
}

/// Stateless normalizer applied independently to every row of a batch
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    method: NormalizationMethod,
}

impl Normalizer {
    /// Create a new normalizer
    pub fn new(method: NormalizationMethod) -> Self {
        Self { method }
    }

    /// Method in use
    pub fn method(&self) -> NormalizationMethod {
        self.method
    }

    /// Normalize every row of `samples`, preserving the shape
    pub fn normalize_rows(&self, samples: ArrayView2<f64>) -> Array2<f64> {
        let mut out = samples.to_owned();
        if self.method == NormalizationMethod::None || out.ncols() == 0 {
            return out;
        }

        debug!(
            "Normalizing {}x{} batch with {:?}",
            out.nrows(),
            out.ncols(),
            self.method
        );

        for mut row in out.axis_iter_mut(Axis(0)) {
            let n = row.len() as f64;
            match self.method {
                NormalizationMethod::ZScore => {
                    let mean = row.sum() / n;
                    let variance = row.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
                    let std_dev = variance.sqrt().max(MIN_SPREAD);
                    row.mapv_inplace(|v| (v - mean) / std_dev);
                }
                NormalizationMethod::Center => {
                    let mean = row.sum() / n;
                    row.mapv_inplace(|v| v - mean);
                }
                NormalizationMethod::MinMax => {
                    let min = row.iter().cloned().fold(f64::MAX, f64::min);
                    let max = row.iter().cloned().fold(f64::MIN, f64::max);
                    let range = (max - min).max(MIN_SPREAD);
                    row.mapv_inplace(|v| (v - min) / range);
                }
                NormalizationMethod::None => {}
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_zscore_rows_are_centered_and_scaled() {
        let samples = array![[1.0, 2.0, 3.0, 4.0], [10.0, 10.0, 30.0, 30.0]];
        let out = Normalizer::new(NormalizationMethod::ZScore).normalize_rows(samples.view());

        for row in out.axis_iter(Axis(0)) {
            let mean = row.sum() / row.len() as f64;
            let var = row.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / row.len() as f64;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_center_keeps_scale() {
        let samples = array![[1.0, 3.0]];
        let out = Normalizer::new(NormalizationMethod::Center).normalize_rows(samples.view());
        assert_eq!(out, array![[-1.0, 1.0]]);
    }

    #[test]
    fn test_minmax_range() {
        let samples = array![[5.0, 7.0, 9.0]];
        let out = Normalizer::new(NormalizationMethod::MinMax).normalize_rows(samples.view());
        assert_eq!(out, array![[0.0, 0.5, 1.0]]);
    }

    #[test]
    fn test_flat_row_stays_finite() {
        let samples = array![[4.0, 4.0, 4.0, 4.0]];
        let out = Normalizer::default().normalize_rows(samples.view());
        assert!(out.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_none_is_identity() {
        let samples = array![[1.5, -2.0], [0.0, 8.0]];
        let out = Normalizer::new(NormalizationMethod::None).normalize_rows(samples.view());
        assert_eq!(out, samples);
    }

    proptest! {
        #[test]
        fn prop_shape_is_preserved(
            rows in 1usize..6,
            cols in 1usize..40,
            seed in proptest::collection::vec(-100.0f64..100.0, 240),
        ) {
            let samples = Array2::from_shape_fn((rows, cols), |(r, c)| seed[(r * cols + c) % seed.len()]);
            for method in [
                NormalizationMethod::ZScore,
                NormalizationMethod::Center,
                NormalizationMethod::MinMax,
                NormalizationMethod::None,
            ] {
                let out = Normalizer::new(method).normalize_rows(samples.view());
                prop_assert_eq!(out.dim(), samples.dim());
                prop_assert!(out.iter().all(|v| v.is_finite()));
            }
        }
    }
}
