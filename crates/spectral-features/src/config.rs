//! Spectral feature configuration

use crate::error::SpectralError;
use crate::filter::HighPassConfig;
use crate::mains::MainsFrequency;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use signal_conditioning::NormalizationMethod;
use std::path::Path;

/// Default power-line frequency (Hz)
pub const POWER_FREQUENCY: f64 = 50.0;

/// Default sampling rate (samples per second)
pub const SAMPLING_RATE: f64 = 6400.0;

/// Default number of harmonics
pub const HARMONIC_COUNT: usize = 20;

/// Harmonics used by the harmonic spectral centroid
pub const CENTROID_HARMONIC_COUNT: usize = 50;

/// Spectral feature configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Power-line frequency (Hz)
    pub power_frequency: f64,

    /// Sampling rate (samples per second)
    pub sampling_rate: f64,

    /// Number of harmonics for HED, THD, OER, tristimulus
    pub harmonic_count: usize,

    /// Number of harmonics for the harmonic spectral centroid
    pub centroid_harmonic_count: usize,

    /// FFT window; largest power of two that fits when unset
    pub window: Option<usize>,

    /// Row normalization before the transform
    pub normalization: NormalizationMethod,

    /// Mains frequency used as the amplitude reference
    pub mains_frequency: MainsFrequency,

    /// High-pass filter for the high frequency features
    pub high_pass: HighPassConfig,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            power_frequency: POWER_FREQUENCY,
            sampling_rate: SAMPLING_RATE,
            harmonic_count: HARMONIC_COUNT,
            centroid_harmonic_count: CENTROID_HARMONIC_COUNT,
            window: None,
            normalization: NormalizationMethod::default(),
            mains_frequency: MainsFrequency::default(),
            high_pass: HighPassConfig::default(),
        }
    }
}

impl SpectralConfig {
    /// Configuration for 60 Hz grids
    pub fn sixty_hertz() -> Self {
        Self {
            power_frequency: 60.0,
            ..Default::default()
        }
    }

    /// Load from a file, overridden by `SPECTRAL__*` environment variables
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpectralError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix("SPECTRAL").separator("__"))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from an embedded TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, SpectralError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SpectralError> {
        if !(self.power_frequency > 0.0 && self.power_frequency.is_finite()) {
            return Err(SpectralError::InvalidConfig(format!(
                "power_frequency must be positive, got {}",
                self.power_frequency
            )));
        }
        if !(self.sampling_rate > 0.0 && self.sampling_rate.is_finite()) {
            return Err(SpectralError::InvalidConfig(format!(
                "sampling_rate must be positive, got {}",
                self.sampling_rate
            )));
        }
        if self.harmonic_count < 10 {
            return Err(SpectralError::InvalidConfig(format!(
                "harmonic_count must be at least 10, got {}",
                self.harmonic_count
            )));
        }
        if self.centroid_harmonic_count == 0 {
            return Err(SpectralError::InvalidConfig(
                "centroid_harmonic_count must be positive".to_string(),
            ));
        }
        let highest = self.harmonic_count.max(self.centroid_harmonic_count);
        let nyquist = self.sampling_rate / 2.0;
        if highest as f64 * self.power_frequency > nyquist {
            return Err(SpectralError::InvalidConfig(format!(
                "harmonic {} of {}Hz exceeds the {}Hz limit of a {}Hz sampling rate",
                highest, self.power_frequency, nyquist, self.sampling_rate
            )));
        }
        if let Some(window) = self.window {
            if window < 2 {
                return Err(SpectralError::InvalidConfig(format!(
                    "window must be at least 2 samples, got {}",
                    window
                )));
            }
        }
        if !self.high_pass.cutoff.is_finite() {
            return Err(SpectralError::InvalidCutoff(self.high_pass.cutoff));
        }
        Ok(())
    }
}
