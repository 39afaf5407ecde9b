//! LPC analysis tests for libvox

use libvox_speech::lpc::*;
use libvox_speech::{AutocorrelationVector, LpcCoefficients, VoxError, LPC_ORDER, LPC_WINDOW};

/// small deterministic test signal, not periodic within a window
fn voiced_window(len: usize) -> Vec<f64> {
    let mut seed: u32 = 12345;
    (0..len)
        .map(|i| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let noise = ((seed >> 16) & 0x7fff) as f64 / 32768.0 - 0.5;
            let t = i as f64;
            800.0 * (t * 0.21).sin() + 300.0 * (t * 0.57).sin() + 50.0 * noise
        })
        .collect()
}

/// theoretical autocorrelation of a stable AR(2) process
fn ar2_autocorrelation(a1: f64, a2: f64) -> AutocorrelationVector {
    let mut r = [0.0; LPC_ORDER + 1];
    r[0] = 1.0;
    r[1] = a1 / (1.0 - a2);
    for k in 2..=LPC_ORDER {
        r[k] = a1 * r[k - 1] + a2 * r[k - 2];
    }
    AutocorrelationVector(r)
}

fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < tolerance,
            "index {}: got {}, expected {}",
            i,
            a,
            e
        );
    }
}

// ============================================================================
// Autocorrelation Tests
// ============================================================================

#[test]
fn test_autocorrelation_energy() {
    let window = voiced_window(LPC_WINDOW);
    let r = autocorrelation(&window).unwrap();

    let energy: f64 = window.iter().map(|s| s * s).sum();
    assert!((r.energy() - energy).abs() < 1e-6 * energy);

    // R[0] bounds every other lag
    for lag in 1..=LPC_ORDER {
        assert!(r.energy() >= r.lag(lag).abs());
    }
}

#[test]
fn test_autocorrelation_lag_sum() {
    let mut window = vec![0.0; LPC_WINDOW];
    window[0] = 1.0;
    window[1] = 2.0;
    window[319] = 3.0;

    let r = autocorrelation(&window).unwrap();
    assert_eq!(r.lag(0), 14.0);
    assert_eq!(r.lag(1), 2.0);
    // the last sample has no partner inside the window for lag > 0
    assert_eq!(r.lag(12), 0.0);
}

#[test]
fn test_autocorrelation_wrong_length() {
    for len in [0, 319, 321, 640] {
        let window = vec![1.0; len];
        assert_eq!(
            autocorrelation(&window),
            Err(VoxError::InvalidInputLength {
                expected: LPC_WINDOW,
                got: len
            })
        );
    }
}

// ============================================================================
// Levinson-Durbin Tests
// ============================================================================

#[test]
fn test_white_spectrum_has_zero_predictor() {
    let mut r = [0.0; LPC_ORDER + 1];
    r[0] = 1.0;

    let solution = levinson_durbin(&AutocorrelationVector(r)).unwrap();
    assert_eq!(solution.coefficients, LpcCoefficients([0.0; LPC_ORDER]));
    assert_eq!(solution.prediction_error, 1.0);
    assert!(solution.is_stable());
}

#[test]
fn test_recovers_ar1_process() {
    let mut r = [0.0; LPC_ORDER + 1];
    for (k, value) in r.iter_mut().enumerate() {
        *value = 0.5f64.powi(k as i32);
    }

    let solution = levinson_durbin(&AutocorrelationVector(r)).unwrap();

    let mut expected = [0.0; LPC_ORDER];
    expected[0] = 0.5;
    assert_close(solution.coefficients.as_slice(), &expected, 1e-12);
    assert!((solution.reflection[0] - 0.5).abs() < 1e-12);
    assert!((solution.prediction_error - 0.75).abs() < 1e-12);
}

#[test]
fn test_recovers_ar2_process() {
    let solution = levinson_durbin(&ar2_autocorrelation(1.3, -0.6)).unwrap();

    let mut expected = [0.0; LPC_ORDER];
    expected[0] = 1.3;
    expected[1] = -0.6;
    assert_close(solution.coefficients.as_slice(), &expected, 1e-9);
    assert_eq!(solution.coefficients.a(1), solution.coefficients.as_slice()[0]);
    assert!(solution.is_stable());
}

#[test]
fn test_zero_energy_is_degenerate() {
    let r = AutocorrelationVector([0.0; LPC_ORDER + 1]);
    assert!(matches!(
        levinson_durbin(&r),
        Err(VoxError::DegenerateSignal(_))
    ));
}

#[test]
fn test_collapsed_prediction_error_is_degenerate() {
    // perfectly predictable after one step: k1 = 1, E1 = 0
    let r = AutocorrelationVector([1.0; LPC_ORDER + 1]);
    assert!(matches!(
        levinson_durbin(&r),
        Err(VoxError::DegenerateSignal(_))
    ));
}

#[test]
fn test_unstable_reflection_is_reported() {
    let mut r = [0.0; LPC_ORDER + 1];
    r[0] = 1.0;
    r[1] = 2.0;

    let solution = levinson_durbin(&AutocorrelationVector(r)).unwrap();
    assert_eq!(solution.reflection[0], 2.0);
    assert!(!solution.is_stable());
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn test_residual_inverts_synthesis() {
    let mut values = [0.0; LPC_ORDER];
    values[0] = 1.3;
    values[1] = -0.6;
    values[4] = 0.05;
    let coeffs = LpcCoefficients(values);

    let excitation = voiced_window(400);
    let signal = synthesize(&coeffs, &excitation);
    let residual = prediction_error(&signal, &coeffs);

    assert_eq!(residual.len(), signal.len());
    assert_eq!(&residual[..LPC_ORDER], &signal[..LPC_ORDER]);
    assert_close(&residual[LPC_ORDER..], &excitation[LPC_ORDER..], 1e-6);
}

// ============================================================================
// Analyzer Tests
// ============================================================================

#[test]
fn test_analyzer_recovers_ar2_impulse_response() {
    let mut values = [0.0; LPC_ORDER];
    values[0] = 1.3;
    values[1] = -0.6;

    let mut impulse = vec![0.0; LPC_WINDOW];
    impulse[0] = 1.0;
    let window = synthesize(&LpcCoefficients(values), &impulse);

    let analysis = LpcAnalyzer::new().analyze(&window).unwrap();
    assert_close(analysis.coefficients.as_slice(), &values, 1e-6);
    assert!(analysis.stable);
}

#[test]
fn test_analyzer_ignores_amplitude() {
    let window = voiced_window(LPC_WINDOW);
    let louder: Vec<f64> = window.iter().map(|s| s * 3.0).collect();

    let analyzer = LpcAnalyzer::new();
    let a = analyzer.analyze(&window).unwrap();
    let b = analyzer.analyze(&louder).unwrap();

    assert_close(a.coefficients.as_slice(), b.coefficients.as_slice(), 1e-6);
    // normalized peak is fixed, so the energies match too
    assert!((a.autocorrelation.energy() - b.autocorrelation.energy()).abs() < 1e-3);
}

#[test]
fn test_analyzer_removes_dc_shift() {
    let window = voiced_window(LPC_WINDOW);
    let shifted: Vec<f64> = window.iter().map(|s| s + 120.0).collect();

    let plain = LpcAnalyzer::new().analyze(&window).unwrap();
    let corrected = LpcAnalyzer::new()
        .with_dc_shift(120.0)
        .analyze(&shifted)
        .unwrap();

    assert_close(
        plain.coefficients.as_slice(),
        corrected.coefficients.as_slice(),
        1e-6,
    );
}

#[test]
fn test_normalize_hits_target_peak() {
    let analyzer = LpcAnalyzer::new().with_target_peak(1000.0);
    let normalized = analyzer.normalize(&[1.0, -4.0, 2.0]).unwrap();
    assert_eq!(normalized, vec![250.0, -1000.0, 500.0]);
}

#[test]
fn test_zero_window_is_degenerate() {
    let window = vec![0.0; LPC_WINDOW];
    assert!(matches!(
        LpcAnalyzer::new().analyze(&window),
        Err(VoxError::DegenerateSignal(_))
    ));

    // constant window collapses to zero once the DC shift is removed
    let constant = vec![7.0; LPC_WINDOW];
    assert!(matches!(
        LpcAnalyzer::new().with_dc_shift(7.0).analyze(&constant),
        Err(VoxError::DegenerateSignal(_))
    ));
}

#[test]
fn test_analyzer_window_length() {
    let analyzer = LpcAnalyzer::new();
    assert!(matches!(
        analyzer.analyze(&voiced_window(300)),
        Err(VoxError::InvalidInputLength { got: 300, .. })
    ));

    // longer recordings use their first window
    let recording = voiced_window(1000);
    let leading = analyzer.analyze_leading(&recording).unwrap();
    let first = analyzer.analyze(&recording[..LPC_WINDOW]).unwrap();
    assert_eq!(leading, first);
}

#[test]
fn test_analyzer_integer_samples() {
    let window = voiced_window(LPC_WINDOW);
    let ints: Vec<i32> = window.iter().map(|s| s.round() as i32).collect();
    let rounded: Vec<f64> = ints.iter().map(|&s| s as f64).collect();

    let analyzer = LpcAnalyzer::new();
    assert_eq!(
        analyzer.analyze_i32(&ints).unwrap(),
        analyzer.analyze(&rounded).unwrap()
    );
}

#[test]
fn test_invalid_config_rejected() {
    let config = libvox_speech::LpcConfig {
        target_peak: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        LpcAnalyzer::with_config(config),
        Err(VoxError::InvalidConfig(_))
    ));
}
