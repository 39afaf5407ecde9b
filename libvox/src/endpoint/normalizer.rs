use crate::core::{NoiseProfile, VoxError, VoxResult, WordSegment};

/// Removes the DC shift and scales a word to a fixed peak amplitude.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    dc_shift: f64,
    target_scale: f64,
    normalization_value: i32,
}

impl Normalizer {
    /// Build from the word's own peak and the recording's noise profile
    ///
    /// Fails with `DegenerateSignal` when the word is silent (peak 0).
    pub fn new(segment: &WordSegment, profile: &NoiseProfile, target_scale: f64) -> VoxResult<Self> {
        let normalization_value = segment.peak();
        if normalization_value == 0 {
            return Err(VoxError::degenerate(
                "word segment is silent, normalization value is 0",
            ));
        }

        Ok(Self {
            dc_shift: profile.dc_shift,
            target_scale,
            normalization_value,
        })
    }

    /// max |sample| of the word
    pub fn normalization_value(&self) -> i32 {
        self.normalization_value
    }

    /// (sample - dc_shift) * target_scale / normalization_value
    #[inline]
    pub fn modulate(&self, sample: i32) -> f64 {
        (sample as f64 - self.dc_shift) * self.target_scale / self.normalization_value as f64
    }

    pub fn normalize(&self, samples: &[i32]) -> Vec<f64> {
        samples.iter().map(|&s| self.modulate(s)).collect()
    }
}
