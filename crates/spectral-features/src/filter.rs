//! High-pass Filtering of Magnitude Spectra
//!
//! Bins at or above the cutoff pass unchanged. Bins below it are scaled by a
//! gain that depends on the filter type:
//!
//! - `zero`: gain 0
//! - `linear`: gain `f / cutoff`
//! - `quadratic`: gain `(f / cutoff)^2`
//! - `none`: gain 1 everywhere

use crate::error::SpectralError;
use crate::frequency::spectral_frequencies;
use crate::window::Window;
use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the attenuation below the cutoff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Low-frequency amplitudes are set to zero
    #[default]
    Zero,
    /// Amplitudes scaled by `f / cutoff`
    Linear,
    /// Amplitudes scaled by `(f / cutoff)^2`
    Quadratic,
    /// Pass everything
    None,
}

impl FromStr for FilterType {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Self::Zero),
            "linear" => Ok(Self::Linear),
            "quadratic" => Ok(Self::Quadratic),
            "none" => Ok(Self::None),
            other => Err(SpectralError::UnsupportedFilterType(other.to_string())),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// High-pass filter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighPassConfig {
    /// Attenuation shape
    pub filter_type: FilterType,
    /// Cutoff frequency (Hz)
    pub cutoff: f64,
}

impl Default for HighPassConfig {
    fn default() -> Self {
        Self {
            filter_type: FilterType::Zero,
            cutoff: 1000.0,
        }
    }
}

impl HighPassConfig {
    /// Per-bin gains for the given bin frequencies
    pub fn gains(&self, frequencies: &Array1<f64>) -> Result<Array1<f64>, SpectralError> {
        if !self.cutoff.is_finite() {
            return Err(SpectralError::InvalidCutoff(self.cutoff));
        }
        let cutoff = self.cutoff;

        let gain: fn(f64, f64) -> f64 = match self.filter_type {
            FilterType::Zero => |_: f64, _: f64| 0.0,
            FilterType::Linear => |f: f64, c: f64| f / c,
            FilterType::Quadratic => |f: f64, c: f64| (f / c).powi(2),
            FilterType::None => return Ok(Array1::ones(frequencies.len())),
        };

        Ok(frequencies.mapv(|f| if f < cutoff { gain(f, cutoff) } else { 1.0 }))
    }

    /// Apply the filter to every row of a magnitude spectrum
    pub fn apply(
        &self,
        spectrum: ArrayView2<f64>,
        sampling_rate: f64,
    ) -> Result<Array2<f64>, SpectralError> {
        let window = Window::from_bins(spectrum.ncols())?;
        let freqs = spectral_frequencies(window, sampling_rate);
        let gains = self.gains(&freqs)?;
        Ok(&spectrum * &gains)
    }
}

/// Apply a high-pass filter named by `filter_type` (`zero`, `linear`,
/// `quadratic` or `none`) with the given cutoff
pub fn high_pass_filter(
    spectrum: ArrayView2<f64>,
    filter_type: &str,
    filter_frequency: f64,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    HighPassConfig {
        filter_type: filter_type.parse()?,
        cutoff: filter_frequency,
    }
    .apply(spectrum, sampling_rate)
}
