//! Spectral Feature Catalog
//!
//! Every feature is a pure row-wise function returning one row per
//! observation. Inputs are magnitude spectra `(rows, bins)`, harmonic
//! amplitudes `(rows, n)` with column `i` holding harmonic `i + 1`, and mains
//! amplitudes `(rows, 1)`.

use crate::error::SpectralError;
use crate::filter::HighPassConfig;
use crate::frequency::spectral_frequencies;
use crate::statistics::{column, divide_rows, geo_mean, max, mean, rms, sum};
use crate::window::Window;
use ndarray::{s, Array2, ArrayView2, Axis};

/// Amplitudes at exactly zero are replaced by this before taking logs
const FLATNESS_EPSILON: f64 = 0.00001;

/// Harmonics considered by the odd-even ratio and tristimulus
const HARMONIC_SPAN: usize = 20;

fn require_columns(
    feature: &'static str,
    matrix: ArrayView2<f64>,
    required: usize,
) -> Result<(), SpectralError> {
    if matrix.ncols() < required {
        return Err(SpectralError::TooFewColumns {
            feature,
            required,
            actual: matrix.ncols(),
        });
    }
    Ok(())
}

/// Odd-even ratio (OER).
///
/// `mean(x1, x3, ..., x19) / mean(x2, x4, ..., x20)` over the first 20
/// harmonics (or all of them when fewer are given).
pub fn odd_even_ratio(harmonics: ArrayView2<f64>) -> Result<Array2<f64>, SpectralError> {
    require_columns("odd-even ratio", harmonics, 2)?;
    let span = harmonics.slice(s![.., ..harmonics.ncols().min(HARMONIC_SPAN)]);
    let odd = span.slice(s![.., 0..;2]);
    let even = span.slice(s![.., 1..;2]);
    Ok(&mean(odd) / &mean(even))
}

/// Spectral flatness (SPF): geometric mean over arithmetic mean of the bins
pub fn spectral_flatness(spectrum: ArrayView2<f64>) -> Result<Array2<f64>, SpectralError> {
    require_columns("spectral flatness", spectrum, 1)?;
    let clamped = spectrum.mapv(|v| if v == 0.0 { FLATNESS_EPSILON } else { v });
    Ok(&geo_mean(clamped.view()) / &mean(clamped.view()))
}

/// Harmonics energy distribution (HED): harmonics scaled by the mains amplitude
pub fn harmonics_energy_distribution(
    harmonics: ArrayView2<f64>,
    mains_amplitude: ArrayView2<f64>,
) -> Result<Array2<f64>, SpectralError> {
    divide_rows(harmonics, mains_amplitude)
}

/// Tristimulus `(T1, T2, T3)` as a `(rows, 3)` matrix.
///
/// With `S = x1 + ... + x20`: `T1 = x1 / S`, `T2 = (x2 + x3 + x4) / S`,
/// `T3 = (x5 + ... + x10) / S`.
pub fn tristimulus(harmonics: ArrayView2<f64>) -> Result<Array2<f64>, SpectralError> {
    require_columns("tristimulus", harmonics, 10)?;
    let total = harmonics
        .slice(s![.., ..harmonics.ncols().min(HARMONIC_SPAN)])
        .sum_axis(Axis(1));
    let t1 = harmonics.column(0).to_owned() / &total;
    let t2 = harmonics.slice(s![.., 1..4]).sum_axis(Axis(1)) / &total;
    let t3 = harmonics.slice(s![.., 4..10]).sum_axis(Axis(1)) / &total;
    Ok(ndarray::stack(Axis(1), &[t1.view(), t2.view(), t3.view()])?)
}

/// Total harmonic distortion (THD): `rms(harmonics) / mains amplitude`
pub fn total_harmonic_distortion(
    harmonics: ArrayView2<f64>,
    mains_amplitude: ArrayView2<f64>,
) -> Result<Array2<f64>, SpectralError> {
    require_columns("total harmonic distortion", harmonics, 1)?;
    divide_rows(rms(harmonics).view(), mains_amplitude)
}

/// Spectral centroid (SPC): `sum(x_f / f) / sum(x_f)` over every bin but DC.
///
/// Bin frequencies are derived from the spectrum's own window.
pub fn spectral_centroid(
    spectrum: ArrayView2<f64>,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    let window = Window::from_bins(spectrum.ncols())?;
    let freqs = spectral_frequencies(window, sampling_rate);
    let freqs = freqs.slice(s![1..]);
    let body = spectrum.slice(s![.., 1..]);
    Ok(&sum((&body / &freqs).view()) / &sum(body))
}

/// Harmonic spectral centroid (HSPC): `sum(i * x_i) / sum(x_i)`.
///
/// Computed on the first 50 harmonics by the extractor.
pub fn harmonic_spectral_centroid(harmonics: ArrayView2<f64>) -> Result<Array2<f64>, SpectralError> {
    require_columns("harmonic spectral centroid", harmonics, 1)?;
    let weights = ndarray::Array1::from_shape_fn(harmonics.ncols(), |i| (i + 1) as f64);
    let weighted = harmonics.dot(&weights);
    Ok(&column(weighted) / &sum(harmonics))
}

/// Signal to signal mean ratio (SSMR): `max(spectrum) / mean(spectrum)`
pub fn signal_to_signal_mean_ratio(spectrum: ArrayView2<f64>) -> Result<Array2<f64>, SpectralError> {
    require_columns("signal to signal mean ratio", spectrum, 1)?;
    Ok(&max(spectrum) / &mean(spectrum))
}

/// Amplitude of the second harmonic
pub fn second_harmonic(harmonics: ArrayView2<f64>) -> Result<Array2<f64>, SpectralError> {
    require_columns("second harmonic", harmonics, 2)?;
    Ok(harmonics.slice(s![.., 1..2]).to_owned())
}

/// High frequency spectral centroid (HFSPC): centroid of the filtered spectrum
pub fn high_frequency_spectral_centroid(
    spectrum: ArrayView2<f64>,
    filter: &HighPassConfig,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    let filtered = filter.apply(spectrum, sampling_rate)?;
    spectral_centroid(filtered.view(), sampling_rate)
}

/// High frequency spectral flatness (HFSPF): flatness of the filtered spectrum
pub fn high_frequency_spectral_flatness(
    spectrum: ArrayView2<f64>,
    filter: &HighPassConfig,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    let filtered = filter.apply(spectrum, sampling_rate)?;
    spectral_flatness(filtered.view())
}

/// High frequency spectral mean (HFSPM): mean amplitude of the filtered spectrum
pub fn high_frequency_spectral_mean(
    spectrum: ArrayView2<f64>,
    filter: &HighPassConfig,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    let filtered = filter.apply(spectrum, sampling_rate)?;
    Ok(mean(filtered.view()))
}
