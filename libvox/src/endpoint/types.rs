//! Endpoint state and running totals

use serde::{Deserialize, Serialize};

/// Word boundary detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorState {
    /// Waiting for a sample above the noise level
    Idle,
    /// Inside a candidate word
    Detecting,
    /// Word ended, further samples are ignored
    Done,
}

/// Totals accumulated over every frame of one word
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// sum of frame mean energies
    pub total_energy: f64,
    /// sum of frame zero-crossing counts
    pub total_zcr: u64,
    pub frame_count: usize,
}
