//! Bin Frequencies and Harmonic Selection

use crate::error::SpectralError;
use crate::fft::FftAnalyzer;
use crate::window::Window;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use signal_conditioning::NormalizationMethod;
use tracing::debug;

/// Physical frequency (Hz) of every one-sided bin: `k / window * sampling_rate`
pub fn spectral_frequencies(window: Window, sampling_rate: f64) -> Array1<f64> {
    let n = window.len() as f64;
    Array1::from_shape_fn(window.bins(), |k| k as f64 / n * sampling_rate)
}

/// Bin frequencies, optionally limited to the bins nearest the first `n`
/// multiples of `power_frequency`
pub fn frequency_map(
    window: Window,
    sampling_rate: f64,
    n: usize,
    limit_to_harmonics: bool,
    power_frequency: f64,
) -> Result<Array1<f64>, SpectralError> {
    let freqs = spectral_frequencies(window, sampling_rate);
    if !limit_to_harmonics {
        return Ok(freqs);
    }
    let idxs = harmonic_indices(freqs.view(), n, power_frequency)?;
    Ok(freqs.select(Axis(0), &idxs))
}

/// Index of the bin nearest to each of the first `n` harmonics.
///
/// Exact ties resolve to the lower-frequency bin. Harmonics above the highest
/// bin frequency are rejected rather than clamped to the last bin.
pub fn harmonic_indices(
    frequencies: ArrayView1<f64>,
    n: usize,
    power_frequency: f64,
) -> Result<Vec<usize>, SpectralError> {
    let max_frequency = frequencies.iter().cloned().fold(0.0, f64::max);

    (1..=n)
        .map(|harmonic| {
            let target = harmonic as f64 * power_frequency;
            if target > max_frequency {
                return Err(SpectralError::HarmonicOutOfRange {
                    harmonic,
                    frequency: target,
                    max_frequency,
                });
            }

            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (i, &f) in frequencies.iter().enumerate() {
                let distance = (f.max(0.0) - target).abs();
                if distance < best_distance {
                    best = i;
                    best_distance = distance;
                }
            }
            Ok(best)
        })
        .collect()
}

/// Gather the harmonic columns of a precomputed spectrum
pub fn select_harmonics(
    spectrum: ArrayView2<f64>,
    n: usize,
    power_frequency: f64,
    sampling_rate: f64,
) -> Result<Array2<f64>, SpectralError> {
    let window = Window::from_bins(spectrum.ncols())?;
    let freqs = spectral_frequencies(window, sampling_rate);
    let idxs = harmonic_indices(freqs.view(), n, power_frequency)?;
    debug!("Harmonic bins for {} harmonics: {:?}", n, idxs);
    Ok(spectrum.select(Axis(1), &idxs))
}

/// Amplitudes of the first `n` harmonics of every row of `current`
pub fn harmonics(
    current: ArrayView2<f64>,
    n: usize,
    window: Option<usize>,
    power_frequency: f64,
    sampling_rate: f64,
    normalization: NormalizationMethod,
) -> Result<Array2<f64>, SpectralError> {
    let spectrum = FftAnalyzer::new(normalization).spectrum(current, window)?;
    select_harmonics(spectrum.view(), n, power_frequency, sampling_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_first_harmonic_for_default_setup() {
        // 6400 / 8192 = 0.78125 Hz resolution; 50 Hz is bin 64
        let window = Window::new(8192).unwrap();
        let freqs = spectral_frequencies(window, 6400.0);
        assert_eq!(freqs.len(), 4097);
        assert_eq!(freqs[0], 0.0);

        let idxs = harmonic_indices(freqs.view(), 20, 50.0).unwrap();
        assert_eq!(idxs.len(), 20);
        assert_eq!(idxs[0], 64);
        assert_eq!(freqs[idxs[0]], 50.0);
        for (i, idx) in idxs.iter().enumerate() {
            assert_eq!(*idx, 64 * (i + 1));
        }
    }

    #[test]
    fn test_nearest_bin_and_tie_break() {
        let freqs = array![0.0, 40.0, 60.0, 80.0];
        // 50 is equidistant from 40 and 60: lower bin wins
        assert_eq!(harmonic_indices(freqs.view(), 1, 50.0).unwrap(), vec![1]);
        // 2 x 38 = 76 is nearest to 80
        assert_eq!(harmonic_indices(freqs.view(), 2, 38.0).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_duplicates_for_coarse_resolution() {
        let freqs = array![0.0, 100.0, 200.0];
        let idxs = harmonic_indices(freqs.view(), 4, 50.0).unwrap();
        assert_eq!(idxs, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_harmonic_beyond_nyquist_fails() {
        let window = Window::new(64).unwrap();
        let freqs = spectral_frequencies(window, 6400.0);
        let err = harmonic_indices(freqs.view(), 70, 50.0).unwrap_err();
        assert!(matches!(err, SpectralError::HarmonicOutOfRange { harmonic: 65, .. }));
    }

    #[test]
    fn test_frequency_map_limited() {
        let window = Window::new(128).unwrap();
        let freqs = frequency_map(window, 6400.0, 3, true, 50.0).unwrap();
        assert_eq!(freqs, array![50.0, 100.0, 150.0]);
        let full = frequency_map(window, 6400.0, 3, false, 50.0).unwrap();
        assert_eq!(full.len(), 65);
    }

    #[test]
    fn test_harmonics_shape_and_idempotence() {
        let current = Array2::from_shape_fn((3, 1024), |(r, i)| {
            let t = i as f64 / 6400.0;
            (2.0 * std::f64::consts::PI * 50.0 * t).sin()
                + 0.1 * r as f64 * (2.0 * std::f64::consts::PI * 150.0 * t).sin()
        });
        let a = harmonics(current.view(), 20, None, 50.0, 6400.0, NormalizationMethod::ZScore).unwrap();
        let b = harmonics(current.view(), 20, None, 50.0, 6400.0, NormalizationMethod::ZScore).unwrap();
        assert_eq!(a.dim(), (3, 20));
        assert_eq!(a, b);
        // Fundamental dominates every row
        for row in a.axis_iter(Axis(0)) {
            assert!(row.iter().skip(1).all(|v| *v < row[0]));
        }
    }

    proptest! {
        #[test]
        fn prop_frequency_map_is_increasing(exp in 1u32..14, sampling_rate in 100.0f64..50000.0) {
            let window = Window::new(1usize << exp).unwrap();
            let freqs = spectral_frequencies(window, sampling_rate);
            prop_assert_eq!(freqs.len(), (1usize << exp) / 2 + 1);
            for pair in freqs.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
        }

        #[test]
        fn prop_exact_bins_are_selected(exp in 6u32..14, k in 1usize..32) {
            let window = Window::new(1usize << exp).unwrap();
            let freqs = spectral_frequencies(window, 6400.0);
            prop_assume!(k < freqs.len());
            let target = freqs[k];
            let idxs = harmonic_indices(freqs.view(), 1, target).unwrap();
            prop_assert_eq!(idxs[0], k);
        }
    }
}
