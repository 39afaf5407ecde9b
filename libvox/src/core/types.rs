//! common types for the vox pipelines

use serde::{Deserialize, Serialize};

// constants

/// predictor order, fixed
pub const LPC_ORDER: usize = 12;

/// samples per LPC analysis window
pub const LPC_WINDOW: usize = 320;

/// default peak amplitude after LPC window normalization
pub const LPC_TARGET_PEAK: f64 = 5000.0;

/// leading samples used to profile ambient noise
pub const NOISE_CAPTURE_DURATION: usize = 10000;

/// samples per energy/ZCR frame
pub const FRAME_SIZE: usize = 300;

/// shortest accepted word, in samples
pub const MIN_WORD_LENGTH: usize = 2000;

/// consecutive quiet samples that end a word
pub const NOISE_THRESHOLD_DURATION: usize = 50;

/// amplitude the word segment is scaled to
pub const TARGET_SCALE: f64 = 5000.0;

/// average ZCR at or above which a word counts as "yes"
pub const ZCR_THRESHOLD: f64 = 25.0;

// lpc data

/// Autocorrelation values R[0..=12] of one analysis window.
///
/// `R[0]` is the window energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutocorrelationVector(pub [f64; LPC_ORDER + 1]);

impl AutocorrelationVector {
    /// energy (lag 0)
    pub fn energy(&self) -> f64 {
        self.0[0]
    }

    /// value at `lag`
    pub fn lag(&self, lag: usize) -> f64 {
        self.0[lag]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; LPC_ORDER + 1]> for AutocorrelationVector {
    fn from(values: [f64; LPC_ORDER + 1]) -> Self {
        AutocorrelationVector(values)
    }
}

/// Predictor coefficients A[1..=12].
///
/// Stored zero-based: `coeffs.0[0]` is A[1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LpcCoefficients(pub [f64; LPC_ORDER]);

impl LpcCoefficients {
    /// A[j] with the 1-based index used in the literature
    pub fn a(&self, j: usize) -> f64 {
        self.0[j - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

// endpoint data

/// Ambient noise statistics of one recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseProfile {
    /// max |sample| over the profiled segment
    pub noise_level: i32,
    /// mean sample value over the same segment
    pub dc_shift: f64,
    /// number of samples profiled
    pub sample_count: usize,
}

/// The detected word, in stream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSegment {
    /// index of the first segment sample in the source stream
    pub onset: usize,
    pub samples: Vec<i32>,
}

impl WordSegment {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// index one past the last segment sample in the source stream
    pub fn offset(&self) -> usize {
        self.onset + self.samples.len()
    }

    /// max |sample|, the normalization divisor
    pub fn peak(&self) -> i32 {
        crate::core::analysis::peak_abs(&self.samples)
    }
}

/// Energy and zero crossings of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// 1-based frame number
    pub index: usize,
    /// mean of squared modulated amplitude over the frame
    pub mean_energy: f64,
    pub zcr: u32,
    /// samples in the frame (shorter for the remainder frame)
    pub len: usize,
}

/// Binary decision of the threshold classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Affirmative,
    Negative,
}

impl Label {
    /// the word this label stands for
    pub fn as_word(self) -> &'static str {
        match self {
            Label::Affirmative => "Yes",
            Label::Negative => "No",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_word())
    }
}

/// Output of the threshold classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub average_energy: f64,
    pub average_zcr: f64,
    pub frame_count: usize,
    pub label: Label,
}
