//! End-to-end checks across the public API

use ndarray::{Array2, Axis};
use spectral_features::{
    frequency_map, harmonic_indices, harmonics, high_pass_filter, mains_amplitude,
    spectral_frequencies, spectrum, FeatureExtractor, MainsFrequency, NormalizationMethod,
    SpectralConfig, SpectralError, Window,
};
use std::f64::consts::PI;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn mains_current(rows: usize, cols: usize, fundamental: f64) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, i)| {
        let t = i as f64 / 6400.0;
        (5.0 + r as f64) * (2.0 * PI * fundamental * t).sin()
            + 0.5 * (2.0 * PI * 2.0 * fundamental * t).sin()
    })
}

#[test]
fn default_setup_resolves_first_harmonic_to_fifty_hertz() {
    init_logging();
    let window = Window::new(8192).unwrap();
    let freqs = spectral_frequencies(window, 6400.0);
    let idxs = harmonic_indices(freqs.view(), 20, 50.0).unwrap();
    let resolution = 6400.0 / 8192.0;
    assert_eq!(freqs[idxs[0]], (50.0f64 / resolution).round() * resolution);

    let limited = frequency_map(window, 6400.0, 20, true, 50.0).unwrap();
    assert_eq!(limited.len(), 20);
    assert_eq!(limited[0], 50.0);
    assert_eq!(limited[19], 1000.0);
}

#[test]
fn harmonics_match_spectrum_columns() {
    init_logging();
    let current = mains_current(4, 12800, 50.0);
    let spec = spectrum(current.view(), None, NormalizationMethod::ZScore).unwrap();
    let h = harmonics(current.view(), 20, None, 50.0, 6400.0, NormalizationMethod::ZScore).unwrap();

    assert_eq!(spec.ncols(), 4097);
    assert_eq!(h.dim(), (4, 20));
    for (row, spec_row) in h.axis_iter(Axis(0)).zip(spec.axis_iter(Axis(0))) {
        assert_eq!(row[0], spec_row[64]);
        assert_eq!(row[1], spec_row[128]);
    }
}

#[test]
fn sixty_hertz_grid() {
    init_logging();
    // 6400 / 60 is not an integer, so 60 Hz is not an exact bin of 8192
    let current = mains_current(2, 12800, 60.0);
    let spec = spectrum(current.view(), None, NormalizationMethod::ZScore).unwrap();
    let err = mains_amplitude(spec.view(), MainsFrequency::Power, 60.0, 6400.0).unwrap_err();
    assert!(matches!(err, SpectralError::InvalidMainsFrequency(f) if f == 60.0));

    // Auto detection always lands on a bin
    let amp = mains_amplitude(spec.view(), MainsFrequency::Auto, 60.0, 6400.0).unwrap();
    assert_eq!(amp.dim(), (2, 1));
    assert!(amp.iter().all(|v| *v > 0.0));
}

#[test]
fn none_filter_is_identity_on_real_spectrum() {
    let current = mains_current(3, 4096, 50.0);
    let spec = spectrum(current.view(), None, NormalizationMethod::Center).unwrap();
    for cutoff in [0.0, 50.0, 1000.0, 1e6] {
        let out = high_pass_filter(spec.view(), "none", cutoff, 6400.0).unwrap();
        assert_eq!(out, spec);
    }
}

#[test]
fn extractor_from_toml_config() {
    init_logging();
    let config = SpectralConfig::from_toml_str(
        r#"
        window = 4096
        harmonic_count = 20
        normalization = "center"

        [high_pass]
        filter_type = "linear"
        cutoff = 500.0
        "#,
    )
    .unwrap();
    let mut extractor = FeatureExtractor::new(config).unwrap();
    let features = extractor.extract(mains_current(5, 6000, 50.0).view()).unwrap();

    assert_eq!(features.rows(), 5);
    let h2 = features.column("h2").unwrap();
    let hed2 = features.column("hed_2").unwrap();
    // Second harmonic is a fixed 0.5 tone, fundamental grows with the row
    for r in 1..5 {
        assert!((h2[r] - h2[0]).abs() / h2[0] < 1e-6);
        assert!(hed2[r] < hed2[r - 1]);
    }
}

#[test]
fn window_too_long_is_a_precondition_error() {
    let current = mains_current(1, 1000, 50.0);
    let result = spectrum(current.view(), Some(2048), NormalizationMethod::ZScore);
    assert!(matches!(result, Err(SpectralError::Conditioning(_))));
}
