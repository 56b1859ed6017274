//! Mains Frequency Amplitude
//!
//! Several features are normalized by the amplitude at the mains frequency.
//! The frequency is either the configured power frequency, an explicit bin
//! frequency, or detected from the spectrum by a majority vote over the
//! per-row peaks.

use crate::error::SpectralError;
use crate::frequency::spectral_frequencies;
use crate::window::Window;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the mains frequency is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainsFrequency {
    /// Same as the power frequency
    #[default]
    Power,
    /// Most common peak-amplitude frequency across rows
    Auto,
    /// Explicit frequency, must be an exact bin frequency
    Hz(f64),
}

/// Frequency of the peak-amplitude bin of every row.
///
/// The first bin wins when a row has several equal maxima.
pub fn peak_amplitude_frequencies(
    spectrum: ArrayView2<f64>,
    frequencies: ArrayView1<f64>,
) -> Result<Array1<f64>, SpectralError> {
    if spectrum.ncols() != frequencies.len() {
        return Err(SpectralError::TooFewColumns {
            feature: "peak amplitude frequency",
            required: frequencies.len(),
            actual: spectrum.ncols(),
        });
    }

    Ok(spectrum.map_axis(Axis(1), |row| {
        let (idx, _) = row
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        frequencies[idx]
    }))
}

/// Most common peak-amplitude frequency across all rows.
///
/// Ties between equally common frequencies resolve to the lowest frequency.
pub fn peak_amplitude_frequency(
    spectrum: ArrayView2<f64>,
    frequencies: ArrayView1<f64>,
) -> Result<f64, SpectralError> {
    let peaks = peak_amplitude_frequencies(spectrum, frequencies)?;

    let mut sorted = peaks.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut winner: Option<(f64, usize)> = None;
    for run in sorted.chunk_by(|a, b| a == b) {
        if winner.map_or(true, |(_, best)| run.len() > best) {
            winner = Some((run[0], run.len()));
        }
    }

    winner
        .map(|(frequency, _)| frequency)
        .ok_or(SpectralError::TooFewColumns {
            feature: "peak amplitude frequency",
            required: 1,
            actual: 0,
        })
}

/// Amplitude at the mains frequency for every row, as a `(rows, 1)` column
pub fn mains_amplitude(
    spectrum: ArrayView2<f64>,
    mains_frequency: MainsFrequency,
    power_frequency: f64,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    let window = Window::from_bins(spectrum.ncols())?;
    let freqs = spectral_frequencies(window, sampling_rate);

    let target = match mains_frequency {
        MainsFrequency::Power => power_frequency,
        MainsFrequency::Hz(hz) => hz,
        MainsFrequency::Auto => peak_amplitude_frequency(spectrum, freqs.view())?,
    };

    let idx = freqs
        .iter()
        .position(|&f| f == target)
        .ok_or(SpectralError::InvalidMainsFrequency(target))?;

    debug!("Mains frequency resolved to {}Hz (bin {})", target, idx);
    Ok(spectrum.select(Axis(1), &[idx]))
}
