//! Batch and Window Precondition Checks

use crate::error::ConditioningError;
use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject batches containing NaN or infinite samples
    pub reject_non_finite: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_non_finite: true,
        }
    }
}

/// Largest power of two not exceeding `columns`.
///
/// A 2 s interval at 6400 Hz (12800 samples) yields a window of 8192.
pub fn default_window(columns: usize) -> Result<usize, ConditioningError> {
    if columns == 0 {
        return Err(ConditioningError::EmptyBatch { rows: 0, columns });
    }
    Ok(1usize << (usize::BITS - 1 - columns.leading_zeros()))
}

/// Validator for current sample batches
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check that the batch is non-empty and, if configured, finite
    pub fn validate_batch(&self, samples: ArrayView2<f64>) -> Result<(), ConditioningError> {
        let (rows, columns) = samples.dim();
        if rows == 0 || columns == 0 {
            return Err(ConditioningError::EmptyBatch { rows, columns });
        }

        if self.config.reject_non_finite {
            for (row, values) in samples.axis_iter(Axis(0)).enumerate() {
                if let Some((column, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                    return Err(ConditioningError::NonFinite { row, column, value });
                }
            }
        }

        Ok(())
    }

    /// Check that `window` can be cut from rows of `columns` samples
    pub fn validate_window(&self, window: usize, columns: usize) -> Result<(), ConditioningError> {
        if window < 2 {
            return Err(ConditioningError::InvalidWindow(window));
        }
        if window > columns {
            return Err(ConditioningError::WindowTooLong { window, columns });
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
