use crate::core::{FrameRecord, LpcCoefficients};

/// line-oriented text writer for pipeline output
pub struct Writer {
    buffer: String,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// new writer
    pub fn new() -> Self {
        Writer {
            buffer: String::new(),
        }
    }

    /// A[1..=12], one per line, six decimals
    pub fn coefficients(mut self, coeffs: &LpcCoefficients) -> Self {
        for a in coeffs.iter() {
            self.buffer.push_str(&format!("{:.6}\n", a));
        }
        self
    }

    /// "index mean_energy zcr" per frame
    pub fn frames(mut self, frames: &[FrameRecord]) -> Self {
        for frame in frames {
            self.buffer.push_str(&format!(
                "{} {:.6} {}\n",
                frame.index, frame.mean_energy, frame.zcr
            ));
        }
        self
    }

    /// one sample per line
    pub fn samples(mut self, samples: &[i32]) -> Self {
        for sample in samples {
            self.buffer.push_str(&format!("{}\n", sample));
        }
        self
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
