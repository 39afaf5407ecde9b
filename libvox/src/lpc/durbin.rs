use tracing::warn;

use crate::core::{AutocorrelationVector, LpcCoefficients, VoxError, VoxResult, LPC_ORDER, LPC_WINDOW};

/// Autocorrelation R[0..=12] of one 320-sample window
///
/// R[i] = sum over j of s[j] * s[j + i], for j in 0..320 - i.
pub fn autocorrelation(window: &[f64]) -> VoxResult<AutocorrelationVector> {
    if window.len() != LPC_WINDOW {
        return Err(VoxError::InvalidInputLength {
            expected: LPC_WINDOW,
            got: window.len(),
        });
    }

    let mut r = [0.0f64; LPC_ORDER + 1];
    for (lag, value) in r.iter_mut().enumerate() {
        *value = window[..LPC_WINDOW - lag]
            .iter()
            .zip(&window[lag..])
            .map(|(a, b)| a * b)
            .sum();
    }

    Ok(AutocorrelationVector(r))
}

/// Result of one Durbin recursion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurbinSolution {
    /// A[1..=12]
    pub coefficients: LpcCoefficients,
    /// k[1..=12], zero-based
    pub reflection: [f64; LPC_ORDER],
    /// E[12], the final one-step prediction error energy
    pub prediction_error: f64,
}

impl DurbinSolution {
    /// true when every reflection coefficient lies strictly inside (-1, 1)
    pub fn is_stable(&self) -> bool {
        self.reflection.iter().all(|k| k.abs() < 1.0)
    }
}

/// Levinson-Durbin recursion for the order-12 predictor
///
/// Fails with `DegenerateSignal` when R[0] is zero or when the prediction
/// error energy collapses to zero before order 12. Reflection coefficients
/// outside [-1, 1] are not clamped; they are logged and show up in
/// [`DurbinSolution::is_stable`].
pub fn levinson_durbin(r: &AutocorrelationVector) -> VoxResult<DurbinSolution> {
    let r = &r.0;

    // alpha[i][j] for 1 <= j <= i <= 12; row 0 and column 0 stay unused
    let mut alpha = [[0.0f64; LPC_ORDER + 1]; LPC_ORDER + 1];
    let mut k = [0.0f64; LPC_ORDER + 1];
    let mut e = [0.0f64; LPC_ORDER + 1];

    e[0] = r[0];
    if e[0] == 0.0 {
        return Err(VoxError::degenerate("window has zero energy (R[0] = 0)"));
    }

    for i in 1..=LPC_ORDER {
        if e[i - 1] == 0.0 {
            return Err(VoxError::degenerate(format!(
                "prediction error reached zero at order {}",
                i - 1
            )));
        }

        // row i is computed from row i - 1 only
        let (done, pending) = alpha.split_at_mut(i);
        let prev = &done[i - 1];
        let row = &mut pending[0];

        let mut sum = 0.0;
        for j in 1..i {
            sum += prev[j] * r[i - j];
        }
        k[i] = (r[i] - sum) / e[i - 1];

        row[i] = k[i];
        for j in 1..i {
            row[j] = prev[j] - k[i] * prev[i - j];
        }

        e[i] = (1.0 - k[i] * k[i]) * e[i - 1];

        if k[i].abs() > 1.0 {
            warn!(
                order = i,
                reflection = k[i],
                "reflection coefficient outside [-1, 1], predictor is unstable"
            );
        }
    }

    let mut coefficients = [0.0f64; LPC_ORDER];
    coefficients.copy_from_slice(&alpha[LPC_ORDER][1..]);
    let mut reflection = [0.0f64; LPC_ORDER];
    reflection.copy_from_slice(&k[1..]);

    Ok(DurbinSolution {
        coefficients: LpcCoefficients(coefficients),
        reflection,
        prediction_error: e[LPC_ORDER],
    })
}

/// Calculate prediction residuals
///
/// The first 12 samples have no full history and are returned as-is.
pub fn prediction_error(samples: &[f64], coeffs: &LpcCoefficients) -> Vec<f64> {
    let order = LPC_ORDER;
    let mut residuals = Vec::with_capacity(samples.len());

    residuals.extend_from_slice(&samples[..order.min(samples.len())]);

    for i in order..samples.len() {
        let prediction: f64 = coeffs
            .iter()
            .enumerate()
            .map(|(j, &a)| a * samples[i - j - 1])
            .sum();
        residuals.push(samples[i] - prediction);
    }

    residuals
}

/// Run an excitation through the all-pole filter described by `coeffs`
///
/// s[n] = e[n] + sum of A[j] * s[n - j], with zero initial state.
pub fn synthesize(coeffs: &LpcCoefficients, excitation: &[f64]) -> Vec<f64> {
    let mut samples: Vec<f64> = Vec::with_capacity(excitation.len());

    for (n, &e) in excitation.iter().enumerate() {
        let mut value = e;
        for (j, &a) in coeffs.iter().enumerate() {
            if n > j {
                value += a * samples[n - j - 1];
            }
        }
        samples.push(value);
    }

    samples
}
