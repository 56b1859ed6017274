//! FFT-based Magnitude Spectrum

use crate::error::SpectralError;
use crate::window::Window;
use ndarray::{s, Array2, ArrayView2, Axis};
use rustfft::{num_complex::Complex, FftPlanner};
use signal_conditioning::{NormalizationMethod, Normalizer, Validator};
use tracing::debug;

/// FFT analyzer producing one-sided magnitude spectra for sample batches
pub struct FftAnalyzer {
    /// FFT planner, reused across calls with the same window
    planner: FftPlanner<f64>,
    /// Row-wise normalization applied before the transform
    normalizer: Normalizer,
    validator: Validator,
}

impl FftAnalyzer {
    /// Create a new FFT analyzer
    pub fn new(normalization: NormalizationMethod) -> Self {
        Self {
            planner: FftPlanner::new(),
            normalizer: Normalizer::new(normalization),
            validator: Validator::default(),
        }
    }

    /// Window used for `current` when none is requested
    pub fn resolve_window(
        &self,
        current: ArrayView2<f64>,
        window: Option<usize>,
    ) -> Result<Window, SpectralError> {
        self.validator.validate_batch(current)?;
        let window = match window {
            Some(len) => len,
            None => Window::for_columns(current.ncols())?.len(),
        };
        self.validator.validate_window(window, current.ncols())?;
        Window::new(window)
    }

    /// Magnitude spectrum of the first `window` samples of every row.
    ///
    /// Returns a `(rows, window / 2 + 1)` matrix of non-negative amplitudes.
    pub fn spectrum(
        &mut self,
        current: ArrayView2<f64>,
        window: Option<usize>,
    ) -> Result<Array2<f64>, SpectralError> {
        let window = self.resolve_window(current, window)?;
        let n = window.len();
        let bins = window.bins();

        debug!(
            "Computing spectrum: rows={}, window={}, bins={}",
            current.nrows(),
            n,
            bins
        );

        let normalized = self.normalizer.normalize_rows(current.slice(s![.., ..n]));
        let fft = self.planner.plan_fft_forward(n);
        let mut scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        let mut buffer = vec![Complex::new(0.0, 0.0); n];
        let mut spectrum = Array2::zeros((current.nrows(), bins));

        for (row, mut out) in normalized.axis_iter(Axis(0)).zip(spectrum.axis_iter_mut(Axis(0))) {
            for (slot, &v) in buffer.iter_mut().zip(row.iter()) {
                *slot = Complex::new(v, 0.0);
            }
            fft.process_with_scratch(&mut buffer, &mut scratch);
            for (amp, c) in out.iter_mut().zip(buffer.iter().take(bins)) {
                *amp = c.norm();
            }
        }

        Ok(spectrum)
    }
}

impl Default for FftAnalyzer {
    fn default() -> Self {
        Self::new(NormalizationMethod::default())
    }
}

/// One-shot magnitude spectrum with a fresh analyzer
pub fn spectrum(
    current: ArrayView2<f64>,
    window: Option<usize>,
    normalization: NormalizationMethod,
) -> Result<Array2<f64>, SpectralError> {
    FftAnalyzer::new(normalization).spectrum(current, window)
}
