use super::types::RunTotals;
use crate::core::{is_zero_crossing, FrameRecord, VoxError, VoxResult, FRAME_SIZE};

/// Cuts a word into fixed-size frames and measures energy and zero crossings.
///
/// Energy uses the modulated amplitude; zero crossings compare consecutive
/// raw samples. The sample before the first one counts as 0.
#[derive(Debug, Clone)]
pub struct FrameAggregator {
    frame_size: usize,
    next_index: usize,
    count: usize,
    energy_sum: f64,
    zcr: u32,
    previous: i32,
    totals: RunTotals,
}

impl Default for FrameAggregator {
    fn default() -> Self {
        Self::with_frame_size(FRAME_SIZE)
    }
}

impl FrameAggregator {
    /// Aggregator cutting frames of `frame_size` samples
    ///
    /// Fails with `InvalidConfig` when `frame_size` is 0.
    pub fn new(frame_size: usize) -> VoxResult<Self> {
        if frame_size == 0 {
            return Err(VoxError::InvalidConfig(
                "frame_size must be positive".to_string(),
            ));
        }
        Ok(Self::with_frame_size(frame_size))
    }

    fn with_frame_size(frame_size: usize) -> Self {
        Self {
            frame_size,
            next_index: 1,
            count: 0,
            energy_sum: 0.0,
            zcr: 0,
            previous: 0,
            totals: RunTotals::default(),
        }
    }

    /// samples waiting in the current frame
    pub fn pending_samples(&self) -> usize {
        self.count
    }

    pub fn totals(&self) -> RunTotals {
        self.totals
    }

    /// Push one sample; returns the frame it completed, if any
    pub fn push(&mut self, raw: i32, modulated: f64) -> Option<FrameRecord> {
        if is_zero_crossing(self.previous, raw) {
            self.zcr += 1;
        }
        self.previous = raw;

        self.energy_sum += modulated * modulated;
        self.count += 1;

        if self.count == self.frame_size {
            Some(self.emit())
        } else {
            None
        }
    }

    /// Flush the shorter remainder frame; `None` when nothing is pending
    pub fn finish(&mut self) -> Option<FrameRecord> {
        if self.count == 0 {
            None
        } else {
            Some(self.emit())
        }
    }

    fn emit(&mut self) -> FrameRecord {
        let record = FrameRecord {
            index: self.next_index,
            mean_energy: self.energy_sum / self.count as f64,
            zcr: self.zcr,
            len: self.count,
        };

        self.totals.total_energy += record.mean_energy;
        self.totals.total_zcr += record.zcr as u64;
        self.totals.frame_count += 1;

        self.next_index += 1;
        self.count = 0;
        self.energy_sum = 0.0;
        self.zcr = 0;

        record
    }
}
