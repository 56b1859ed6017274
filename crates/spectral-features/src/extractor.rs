//! Feature Matrix Assembly

use crate::config::SpectralConfig;
use crate::error::SpectralError;
use crate::features::{
    harmonic_spectral_centroid, harmonics_energy_distribution, high_frequency_spectral_centroid,
    high_frequency_spectral_flatness, high_frequency_spectral_mean, odd_even_ratio,
    second_harmonic, signal_to_signal_mean_ratio, spectral_centroid, spectral_flatness,
    total_harmonic_distortion, tristimulus,
};
use crate::fft::FftAnalyzer;
use crate::frequency::select_harmonics;
use crate::mains::mains_amplitude;
use ndarray::{concatenate, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Named feature columns, one row per observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    /// Column names, in column order
    pub names: Vec<String>,
    /// Feature values as `(rows, names.len())`
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    /// Number of observations
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Column of a named feature
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values.column(idx))
    }
}

/// Intermediate products shared by several features
#[derive(Debug, Clone)]
pub struct SpectralProducts {
    /// Magnitude spectrum `(rows, bins)`
    pub spectrum: Array2<f64>,
    /// First `harmonic_count` harmonic amplitudes
    pub harmonics: Array2<f64>,
    /// First `centroid_harmonic_count` harmonic amplitudes
    pub centroid_harmonics: Array2<f64>,
    /// Amplitude at the mains frequency `(rows, 1)`
    pub mains_amplitude: Array2<f64>,
}

/// Feature extractor computing the full spectral catalog for a batch
pub struct FeatureExtractor {
    fft_analyzer: FftAnalyzer,
    config: SpectralConfig,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new(config: SpectralConfig) -> Result<Self, SpectralError> {
        config.validate()?;
        Ok(Self {
            fft_analyzer: FftAnalyzer::new(config.normalization),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// Spectrum, harmonics and mains amplitude for a batch of current rows
    pub fn products(&mut self, current: ArrayView2<f64>) -> Result<SpectralProducts, SpectralError> {
        let cfg = &self.config;
        let spectrum = self.fft_analyzer.spectrum(current, cfg.window)?;
        let harmonics = select_harmonics(
            spectrum.view(),
            cfg.harmonic_count,
            cfg.power_frequency,
            cfg.sampling_rate,
        )?;
        let centroid_harmonics = select_harmonics(
            spectrum.view(),
            cfg.centroid_harmonic_count,
            cfg.power_frequency,
            cfg.sampling_rate,
        )?;
        let mains_amplitude = mains_amplitude(
            spectrum.view(),
            cfg.mains_frequency,
            cfg.power_frequency,
            cfg.sampling_rate,
        )?;

        let silent = mains_amplitude.iter().filter(|v| **v == 0.0).count();
        if silent > 0 {
            warn!("{} rows have zero mains amplitude; HED and THD will not be finite", silent);
        }

        Ok(SpectralProducts {
            spectrum,
            harmonics,
            centroid_harmonics,
            mains_amplitude,
        })
    }

    /// Extract every spectral feature for a batch of current rows
    pub fn extract(&mut self, current: ArrayView2<f64>) -> Result<FeatureMatrix, SpectralError> {
        let products = self.products(current)?;
        let cfg = &self.config;
        let spectrum = products.spectrum.view();
        let harmonics = products.harmonics.view();
        let mains = products.mains_amplitude.view();

        let mut names: Vec<String> = Vec::new();
        let mut blocks: Vec<Array2<f64>> = Vec::new();
        let mut push = |name: &str, block: Array2<f64>| {
            if block.ncols() == 1 {
                names.push(name.to_string());
            } else {
                names.extend((1..=block.ncols()).map(|i| format!("{}_{}", name, i)));
            }
            blocks.push(block);
        };

        push("oer", odd_even_ratio(harmonics)?);
        push("spf", spectral_flatness(spectrum)?);
        push("hed", harmonics_energy_distribution(harmonics, mains)?);
        push("t", tristimulus(harmonics)?);
        push("thd", total_harmonic_distortion(harmonics, mains)?);
        push("spc", spectral_centroid(spectrum, cfg.sampling_rate)?);
        push("hspc", harmonic_spectral_centroid(products.centroid_harmonics.view())?);
        push("ssmr", signal_to_signal_mean_ratio(spectrum)?);
        push("h2", second_harmonic(harmonics)?);
        push(
            "hfspc",
            high_frequency_spectral_centroid(spectrum, &cfg.high_pass, cfg.sampling_rate)?,
        );
        push(
            "hfspf",
            high_frequency_spectral_flatness(spectrum, &cfg.high_pass, cfg.sampling_rate)?,
        );
        push(
            "hfspm",
            high_frequency_spectral_mean(spectrum, &cfg.high_pass, cfg.sampling_rate)?,
        );

        let views: Vec<ArrayView2<f64>> = blocks.iter().map(|b| b.view()).collect();
        let values = concatenate(Axis(1), &views)?;

        debug!(
            "Extracted {} spectral features for {} rows",
            names.len(),
            values.nrows()
        );

        Ok(FeatureMatrix { names, values })
    }
}
