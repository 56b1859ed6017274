//! Conditioning Error Types

use thiserror::Error;

/// Errors raised while checking or preparing a sample batch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditioningError {
    /// Batch has no rows or no columns
    #[error("Empty batch: {rows} rows x {columns} columns")]
    EmptyBatch { rows: usize, columns: usize },

    /// Sample is NaN or infinite
    #[error("Non-finite sample {value} at row {row}, column {column}")]
    NonFinite { row: usize, column: usize, value: f64 },

    /// Window too short to produce a spectrum
    #[error("Invalid window length {0}: at least 2 samples are required")]
    InvalidWindow(usize),

    /// Window longer than the available samples
    #[error("Window of {window} samples exceeds the {columns} available columns")]
    WindowTooLong { window: usize, columns: usize },
}
