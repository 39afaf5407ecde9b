//! Tunable constants for both pipelines.
//!
//! Every field defaults to the value tuned for 16025 Hz mono capture, and every
//! struct deserializes with missing fields filled from those defaults, so a
//! config file only needs the values it changes.

use serde::{Deserialize, Serialize};

use super::error::{VoxError, VoxResult};
use super::types::*;

/// Settings for noise profiling, word detection and frame aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// leading samples profiled for ambient noise
    pub noise_capture_len: usize,
    /// shortest accepted word
    pub min_word_length: usize,
    /// quiet samples that end a word
    pub silence_run: usize,
    pub frame_size: usize,
    /// peak amplitude of the normalized word
    pub target_scale: f64,
    /// average ZCR at or above which the label is affirmative
    pub zcr_threshold: f64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            noise_capture_len: NOISE_CAPTURE_DURATION,
            min_word_length: MIN_WORD_LENGTH,
            silence_run: NOISE_THRESHOLD_DURATION,
            frame_size: FRAME_SIZE,
            target_scale: TARGET_SCALE,
            zcr_threshold: ZCR_THRESHOLD,
        }
    }
}

impl EndpointConfig {
    pub fn validate(&self) -> VoxResult<()> {
        if self.noise_capture_len == 0 {
            return Err(VoxError::InvalidConfig(
                "noise_capture_len must be positive".to_string(),
            ));
        }
        if self.silence_run == 0 {
            return Err(VoxError::InvalidConfig(
                "silence_run must be positive".to_string(),
            ));
        }
        if self.frame_size == 0 {
            return Err(VoxError::InvalidConfig(
                "frame_size must be positive".to_string(),
            ));
        }
        if !(self.target_scale.is_finite() && self.target_scale > 0.0) {
            return Err(VoxError::InvalidConfig(format!(
                "target_scale must be a positive number, got {}",
                self.target_scale
            )));
        }
        if !self.zcr_threshold.is_finite() {
            return Err(VoxError::InvalidConfig(
                "zcr_threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for LPC window analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LpcConfig {
    /// max |sample| after normalization
    pub target_peak: f64,
    /// subtracted from every sample before scaling
    pub dc_shift: f64,
    /// windows kept by steady-window selection
    pub steady_windows: usize,
    /// windows at each end used to estimate the silence threshold
    pub edge_windows: usize,
}

impl Default for LpcConfig {
    fn default() -> Self {
        Self {
            target_peak: LPC_TARGET_PEAK,
            dc_shift: 0.0,
            steady_windows: 5,
            edge_windows: 5,
        }
    }
}

impl LpcConfig {
    pub fn validate(&self) -> VoxResult<()> {
        if !(self.target_peak.is_finite() && self.target_peak > 0.0) {
            return Err(VoxError::InvalidConfig(format!(
                "target_peak must be a positive number, got {}",
                self.target_peak
            )));
        }
        if !self.dc_shift.is_finite() {
            return Err(VoxError::InvalidConfig(
                "dc_shift must be finite".to_string(),
            ));
        }
        if self.steady_windows == 0 || self.edge_windows == 0 {
            return Err(VoxError::InvalidConfig(
                "steady_windows and edge_windows must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete analysis settings, as loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub endpoint: EndpointConfig,
    pub lpc: LpcConfig,
}

impl AnalysisConfig {
    /// parse from JSON, filling missing fields with defaults
    pub fn from_json(text: &str) -> VoxResult<Self> {
        let config: AnalysisConfig =
            serde_json::from_str(text).map_err(|e| VoxError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> VoxResult<()> {
        self.endpoint.validate()?;
        self.lpc.validate()
    }
}
