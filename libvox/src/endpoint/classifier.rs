use super::types::RunTotals;
use crate::core::{ClassificationResult, Label, VoxError, VoxResult, ZCR_THRESHOLD};

/// Fixed-threshold yes/no rule on the average zero-crossing rate.
///
/// Averages below the threshold are negative; the threshold itself counts as
/// affirmative.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdClassifier {
    zcr_threshold: f64,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::new(ZCR_THRESHOLD)
    }
}

impl ThresholdClassifier {
    pub fn new(zcr_threshold: f64) -> Self {
        Self { zcr_threshold }
    }

    pub fn zcr_threshold(&self) -> f64 {
        self.zcr_threshold
    }

    pub fn label_for(&self, average_zcr: f64) -> Label {
        if average_zcr < self.zcr_threshold {
            Label::Negative
        } else {
            Label::Affirmative
        }
    }

    /// Average the run totals over the frame count and label the word
    pub fn classify(
        &self,
        total_energy: f64,
        total_zcr: f64,
        frame_count: usize,
    ) -> VoxResult<ClassificationResult> {
        if frame_count == 0 {
            return Err(VoxError::degenerate("no frames to classify"));
        }

        let average_energy = total_energy / frame_count as f64;
        let average_zcr = total_zcr / frame_count as f64;

        Ok(ClassificationResult {
            average_energy,
            average_zcr,
            frame_count,
            label: self.label_for(average_zcr),
        })
    }

    pub fn classify_totals(&self, totals: &RunTotals) -> VoxResult<ClassificationResult> {
        self.classify(
            totals.total_energy,
            totals.total_zcr as f64,
            totals.frame_count,
        )
    }
}
