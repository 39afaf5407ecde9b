use tracing::debug;

use crate::core::{mean, peak_abs, NoiseProfile, VoxError, VoxResult, NOISE_CAPTURE_DURATION};

/// Measures ambient noise over the leading part of a recording.
#[derive(Debug, Clone, Copy)]
pub struct NoiseProfiler {
    capture_len: usize,
}

impl Default for NoiseProfiler {
    fn default() -> Self {
        Self::new(NOISE_CAPTURE_DURATION)
    }
}

impl NoiseProfiler {
    /// profiler over the first `capture_len` samples
    pub fn new(capture_len: usize) -> Self {
        Self { capture_len }
    }

    pub fn capture_len(&self) -> usize {
        self.capture_len
    }

    /// Noise level (max |sample|) and DC shift (mean) of the leading segment
    ///
    /// Uses fewer samples when the stream is shorter than the capture length.
    pub fn profile(&self, samples: &[i32]) -> VoxResult<NoiseProfile> {
        let segment = &samples[..self.capture_len.min(samples.len())];
        let Some(dc_shift) = mean(segment) else {
            return Err(VoxError::detection_failed(
                "no samples available to profile ambient noise",
            ));
        };

        let profile = NoiseProfile {
            noise_level: peak_abs(segment),
            dc_shift,
            sample_count: segment.len(),
        };
        debug!(
            noise_level = profile.noise_level,
            dc_shift = profile.dc_shift,
            samples = profile.sample_count,
            "noise profiled"
        );
        Ok(profile)
    }
}
