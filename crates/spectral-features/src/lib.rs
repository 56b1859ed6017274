//! Spectral Feature Engine
//!
//! Computes frequency domain features of electrical current waveforms for
//! load disaggregation and power quality analysis: harmonic amplitudes,
//! spectral shape statistics, distortion ratios and high-pass variants.
//!
//! Every operation is a stateless transform from a `(rows, samples)` batch
//! to a `(rows, k)` matrix of feature values.

pub mod config;
mod error;
pub mod extractor;
pub mod features;
pub mod fft;
pub mod filter;
pub mod frequency;
pub mod mains;
pub mod statistics;
mod window;

pub use crate::config::SpectralConfig;
pub use error::SpectralError;
pub use extractor::{FeatureExtractor, FeatureMatrix, SpectralProducts};
pub use fft::{spectrum, FftAnalyzer};
pub use filter::{high_pass_filter, FilterType, HighPassConfig};
pub use frequency::{frequency_map, harmonic_indices, harmonics, spectral_frequencies};
pub use mains::{mains_amplitude, peak_amplitude_frequency, MainsFrequency};
pub use window::Window;

pub use signal_conditioning::NormalizationMethod;
