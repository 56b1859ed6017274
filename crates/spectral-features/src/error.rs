//! Spectral Feature Error Types

use signal_conditioning::ConditioningError;
use thiserror::Error;

/// Errors raised by the spectral feature pipeline
#[derive(Debug, Error)]
pub enum SpectralError {
    /// Requested mains frequency is not a bin of the spectrum
    #[error("Mains frequency of {0}Hz is not in the spectral frequencies generated by the FFT")]
    InvalidMainsFrequency(f64),

    /// Unknown high-pass filter type
    #[error("High-pass filter of type '{0}' is not implemented")]
    UnsupportedFilterType(String),

    /// Cutoff frequency is not usable
    #[error("Invalid high-pass cutoff frequency: {0}Hz")]
    InvalidCutoff(f64),

    /// Harmonic lies above the highest bin frequency
    #[error("Harmonic {harmonic} at {frequency}Hz exceeds the highest bin frequency of {max_frequency}Hz")]
    HarmonicOutOfRange {
        harmonic: usize,
        frequency: f64,
        max_frequency: f64,
    },

    /// Input has fewer columns than a feature needs
    #[error("{feature} needs at least {required} columns, got {actual}")]
    TooFewColumns {
        feature: &'static str,
        required: usize,
        actual: usize,
    },

    /// Two inputs disagree on the number of rows
    #[error("Row count mismatch: {left} vs {right}")]
    RowMismatch { left: usize, right: usize },

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Batch or window precondition failed
    #[error(transparent)]
    Conditioning(#[from] ConditioningError),

    /// Array shape error
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Configuration source could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
