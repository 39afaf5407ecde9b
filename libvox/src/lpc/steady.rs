//! Steady-window selection for recordings longer than one LPC window.
//!
//! The recording is cut into non-overlapping 320-sample windows. The silence
//! threshold is the mean of the quietest window among the first few and the
//! quietest among the last few; windows louder than that are "steady". The
//! middle run of steady windows is analyzed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analyzer::{LpcAnalysis, LpcAnalyzer};
use crate::core::{energy, window_energies, VoxError, VoxResult, LPC_WINDOW};

/// One analyzed steady window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyWindow {
    /// position among all windows of the recording
    pub window_index: usize,
    /// first sample of the window in the recording
    pub start: usize,
    /// raw (pre-normalization) energy
    pub energy: f64,
    pub analysis: LpcAnalysis,
}

/// Silence threshold from the quietest edge windows
fn silence_threshold(energies: &[f64], edge_windows: usize) -> f64 {
    let edge = edge_windows.min(energies.len());
    let head = energies[..edge].iter().copied().fold(f64::INFINITY, f64::min);
    let tail = energies[energies.len() - edge..]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    (head + tail) / 2.0
}

/// Indices of the windows to analyze
///
/// Fails with `InvalidInputLength` if the recording is shorter than one
/// window and `DetectionFailed` if fewer than `steady_windows` windows rise
/// above the silence threshold.
pub fn select_steady_windows(
    samples: &[f64],
    steady_windows: usize,
    edge_windows: usize,
) -> VoxResult<Vec<usize>> {
    let energies = window_energies(samples, LPC_WINDOW);
    if energies.is_empty() {
        return Err(VoxError::InvalidInputLength {
            expected: LPC_WINDOW,
            got: samples.len(),
        });
    }

    let threshold = silence_threshold(&energies, edge_windows);
    let steady: Vec<usize> = energies
        .iter()
        .enumerate()
        .filter(|&(_, &e)| e > threshold)
        .map(|(i, _)| i)
        .collect();

    debug!(
        windows = energies.len(),
        steady = steady.len(),
        threshold,
        "steady windows found"
    );

    if steady.len() < steady_windows {
        return Err(VoxError::detection_failed(format!(
            "only {} steady windows, need {}",
            steady.len(),
            steady_windows
        )));
    }

    let start = (steady.len() / 2)
        .saturating_sub(steady_windows / 2)
        .min(steady.len() - steady_windows);
    Ok(steady[start..start + steady_windows].to_vec())
}

impl LpcAnalyzer {
    /// Analyze the middle steady windows of a recording
    pub fn analyze_steady(&self, samples: &[f64]) -> VoxResult<Vec<SteadyWindow>> {
        let config = self.config();
        let selected =
            select_steady_windows(samples, config.steady_windows, config.edge_windows)?;

        selected
            .into_iter()
            .map(|window_index| {
                let start = window_index * LPC_WINDOW;
                let window = &samples[start..start + LPC_WINDOW];
                Ok(SteadyWindow {
                    window_index,
                    start,
                    energy: energy(window),
                    analysis: self.analyze(window)?,
                })
            })
            .collect()
    }
}
