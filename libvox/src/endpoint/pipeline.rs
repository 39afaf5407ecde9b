use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::classifier::ThresholdClassifier;
use super::detector::WordBoundaryDetector;
use super::frames::FrameAggregator;
use super::noise::NoiseProfiler;
use super::normalizer::Normalizer;
use super::types::RunTotals;
use crate::core::{
    ClassificationResult, EndpointConfig, FrameRecord, NoiseProfile, VoxResult, WordSegment,
};

/// Everything one endpoint run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointReport {
    pub profile: NoiseProfile,
    /// first word sample in the scanned recording
    pub onset: usize,
    pub segment_len: usize,
    pub normalization_value: i32,
    pub frames: Vec<FrameRecord>,
    pub result: ClassificationResult,
}

/// State owned by a single classification run.
///
/// Created fresh for every recording and consumed by [`RunContext::finish`],
/// so totals never leak from one recording into the next.
#[derive(Debug)]
pub struct RunContext {
    profile: NoiseProfile,
    normalizer: Normalizer,
    aggregator: FrameAggregator,
    frames: Vec<FrameRecord>,
}

impl RunContext {
    pub fn new(
        profile: NoiseProfile,
        segment: &WordSegment,
        config: &EndpointConfig,
    ) -> VoxResult<Self> {
        Ok(Self {
            profile,
            normalizer: Normalizer::new(segment, &profile, config.target_scale)?,
            aggregator: FrameAggregator::new(config.frame_size)?,
            frames: Vec::new(),
        })
    }

    pub fn profile(&self) -> &NoiseProfile {
        &self.profile
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn totals(&self) -> RunTotals {
        self.aggregator.totals()
    }

    pub fn normalization_value(&self) -> i32 {
        self.normalizer.normalization_value()
    }

    /// Normalize and aggregate word samples, in order
    pub fn process(&mut self, samples: &[i32]) {
        for &raw in samples {
            let modulated = self.normalizer.modulate(raw);
            if let Some(frame) = self.aggregator.push(raw, modulated) {
                self.frames.push(frame);
            }
        }
    }

    /// Flush the remainder frame and hand back frames and totals
    pub fn finish(mut self) -> (Vec<FrameRecord>, RunTotals) {
        if let Some(frame) = self.aggregator.finish() {
            self.frames.push(frame);
        }
        debug!(frames = self.frames.len(), "frames aggregated");
        (self.frames, self.aggregator.totals())
    }
}

/// Noise profiling, word detection, framing and classification in one call.
#[derive(Debug, Clone, Default)]
pub struct EndpointPipeline {
    config: EndpointConfig,
}

impl EndpointPipeline {
    /// pipeline with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// pipeline with explicit settings
    pub fn with_config(config: EndpointConfig) -> VoxResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Profile the leading segment of `recording`, then find the word in it
    pub fn detect_word(&self, recording: &[i32]) -> VoxResult<(NoiseProfile, WordSegment)> {
        self.detect_word_with_noise(recording, recording)
    }

    /// Profile `noise` (a separate ambient recording), then find the word in `recording`
    pub fn detect_word_with_noise(
        &self,
        noise: &[i32],
        recording: &[i32],
    ) -> VoxResult<(NoiseProfile, WordSegment)> {
        let profile = NoiseProfiler::new(self.config.noise_capture_len).profile(noise)?;
        let segment = WordBoundaryDetector::detect(profile.noise_level, &self.config, recording)?;
        Ok((profile, segment))
    }

    /// Classify a single recording that starts with ambient noise
    pub fn run(&self, recording: &[i32]) -> VoxResult<EndpointReport> {
        let (profile, segment) = self.detect_word(recording)?;
        self.classify_segment(profile, &segment)
    }

    /// Classify `recording` using a separately captured noise recording
    pub fn run_with_noise(&self, noise: &[i32], recording: &[i32]) -> VoxResult<EndpointReport> {
        let (profile, segment) = self.detect_word_with_noise(noise, recording)?;
        self.classify_segment(profile, &segment)
    }

    /// Frame and classify an already detected word
    pub fn classify_segment(
        &self,
        profile: NoiseProfile,
        segment: &WordSegment,
    ) -> VoxResult<EndpointReport> {
        let mut ctx = RunContext::new(profile, segment, &self.config)?;
        ctx.process(&segment.samples);
        let normalization_value = ctx.normalization_value();
        let (frames, totals) = ctx.finish();

        let result = ThresholdClassifier::new(self.config.zcr_threshold).classify_totals(&totals)?;

        info!(
            onset = segment.onset,
            len = segment.len(),
            average_energy = result.average_energy,
            average_zcr = result.average_zcr,
            label = %result.label,
            "word classified"
        );

        Ok(EndpointReport {
            profile,
            onset: segment.onset,
            segment_len: segment.len(),
            normalization_value,
            frames,
            result,
        })
    }
}
