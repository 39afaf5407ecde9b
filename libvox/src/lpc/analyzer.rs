use serde::{Deserialize, Serialize};
use tracing::debug;

use super::durbin::{autocorrelation, levinson_durbin};
use crate::core::{
    peak_abs_f64, AutocorrelationVector, LpcCoefficients, LpcConfig, VoxError, VoxResult,
    LPC_ORDER, LPC_WINDOW,
};

/// Everything computed for one analysis window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LpcAnalysis {
    pub coefficients: LpcCoefficients,
    pub autocorrelation: AutocorrelationVector,
    pub reflection: [f64; LPC_ORDER],
    pub prediction_error: f64,
    /// all reflection coefficients strictly inside (-1, 1)
    pub stable: bool,
}

/// LPC analysis of 320-sample windows.
///
/// Each window is shifted by the DC offset, scaled so its peak equals the
/// target amplitude, then run through autocorrelation and the Durbin
/// recursion.
#[derive(Debug, Clone)]
pub struct LpcAnalyzer {
    config: LpcConfig,
}

impl Default for LpcAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LpcAnalyzer {
    /// analyzer with default settings (peak 5000, no DC shift)
    pub fn new() -> Self {
        Self {
            config: LpcConfig::default(),
        }
    }

    /// analyzer with explicit settings
    pub fn with_config(config: LpcConfig) -> VoxResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Set the peak amplitude after normalization
    pub fn with_target_peak(mut self, target_peak: f64) -> Self {
        self.config.target_peak = target_peak;
        self
    }

    /// Set the DC offset subtracted before scaling
    pub fn with_dc_shift(mut self, dc_shift: f64) -> Self {
        self.config.dc_shift = dc_shift;
        self
    }

    pub fn config(&self) -> &LpcConfig {
        &self.config
    }

    /// Shift and scale a window so its max |sample| equals the target peak
    pub fn normalize(&self, window: &[f64]) -> VoxResult<Vec<f64>> {
        let shifted: Vec<f64> = window.iter().map(|&s| s - self.config.dc_shift).collect();
        let peak = peak_abs_f64(&shifted);
        if peak == 0.0 || !peak.is_finite() {
            return Err(VoxError::degenerate(format!(
                "cannot normalize window with peak amplitude {}",
                peak
            )));
        }

        let scale = self.config.target_peak / peak;
        Ok(shifted.into_iter().map(|s| s * scale).collect())
    }

    /// Analyze exactly one 320-sample window
    pub fn analyze(&self, window: &[f64]) -> VoxResult<LpcAnalysis> {
        if window.len() != LPC_WINDOW {
            return Err(VoxError::InvalidInputLength {
                expected: LPC_WINDOW,
                got: window.len(),
            });
        }

        let normalized = self.normalize(window)?;
        let r = autocorrelation(&normalized)?;
        let solution = levinson_durbin(&r)?;

        debug!(
            energy = r.energy(),
            prediction_error = solution.prediction_error,
            stable = solution.is_stable(),
            "lpc window analyzed"
        );

        Ok(LpcAnalysis {
            coefficients: solution.coefficients,
            autocorrelation: r,
            reflection: solution.reflection,
            prediction_error: solution.prediction_error,
            stable: solution.is_stable(),
        })
    }

    /// Analyze the first 320 samples of a longer recording
    pub fn analyze_leading(&self, samples: &[f64]) -> VoxResult<LpcAnalysis> {
        if samples.len() < LPC_WINDOW {
            return Err(VoxError::InvalidInputLength {
                expected: LPC_WINDOW,
                got: samples.len(),
            });
        }
        self.analyze(&samples[..LPC_WINDOW])
    }

    /// Integer-sample convenience for [`LpcAnalyzer::analyze`]
    pub fn analyze_i32(&self, window: &[i32]) -> VoxResult<LpcAnalysis> {
        let window: Vec<f64> = window.iter().map(|&s| s as f64).collect();
        self.analyze(&window)
    }
}
