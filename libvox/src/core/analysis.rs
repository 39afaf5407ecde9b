//! Amplitude statistics shared by both pipelines

/// Largest absolute sample value, 0 for an empty slice
///
/// Saturates at `i32::MAX` so `i32::MIN` does not overflow.
pub fn peak_abs(samples: &[i32]) -> i32 {
    samples.iter().map(|s| s.saturating_abs()).max().unwrap_or(0)
}

/// Largest absolute value of a float window
pub fn peak_abs_f64(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0f64, f64::max)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(samples: &[i32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|&s| s as f64).sum();
    Some(sum / samples.len() as f64)
}

/// Arithmetic mean of float samples, `None` for an empty slice
pub fn mean_f64(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Sum of squares
pub fn energy(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s * s).sum()
}

/// Energy of each complete, non-overlapping window
///
/// A trailing partial window is ignored.
pub fn window_energies(samples: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    samples.chunks_exact(window).map(energy).collect()
}

/// Whether two consecutive samples have strictly opposite signs
///
/// Zero is neither positive nor negative, so it never crosses.
#[inline]
pub fn is_zero_crossing(previous: i32, current: i32) -> bool {
    (previous < 0 && current > 0) || (previous > 0 && current < 0)
}
