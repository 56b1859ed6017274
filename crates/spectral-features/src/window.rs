//! Transform Window Length
//!
//! A real FFT of `len` samples yields `len / 2 + 1` non-negative frequency
//! bins. `Window` is the single place where that relation is applied in
//! either direction.

use crate::error::SpectralError;
use signal_conditioning::{default_window, ConditioningError};

/// Number of leading samples per row fed to the FFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window(usize);

impl Window {
    /// Window of `len` samples
    pub fn new(len: usize) -> Result<Self, SpectralError> {
        if len < 2 {
            return Err(ConditioningError::InvalidWindow(len).into());
        }
        Ok(Self(len))
    }

    /// Largest power of two not exceeding `columns`
    pub fn for_columns(columns: usize) -> Result<Self, SpectralError> {
        Self::new(default_window(columns)?)
    }

    /// Window that produced a spectrum with `bins` columns
    pub fn from_bins(bins: usize) -> Result<Self, SpectralError> {
        if bins < 2 {
            return Err(SpectralError::TooFewColumns {
                feature: "spectrum",
                required: 2,
                actual: bins,
            });
        }
        Ok(Self((bins - 1) * 2))
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.0
    }

    /// Number of one-sided spectrum bins
    pub fn bins(&self) -> usize {
        self.0 / 2 + 1
    }
}
