#![allow(clippy::needless_range_loop)]

//! Speech features for short recordings.
//!
//! Two independent pipelines:
//!
//! - [`lpc`]: order-12 linear prediction of 320-sample windows
//!   (autocorrelation, then the Levinson-Durbin recursion)
//! - [`endpoint`]: noise profiling, word boundary detection and per-frame
//!   energy/zero-crossing features feeding a fixed yes/no threshold
//!
//! Both take in-memory samples; [`Reader`] and [`Writer`] handle the
//! line-oriented text format the samples and results are exchanged in.

use wasm_bindgen::prelude::*;

pub mod core;
pub mod endpoint;
pub mod lpc;

mod reader;
mod writer;

pub use core::{
    AnalysisConfig, AutocorrelationVector, ClassificationResult, EndpointConfig, FrameRecord,
    Label, LpcCoefficients, LpcConfig, NoiseProfile, VoxError, VoxResult, WordSegment, FRAME_SIZE,
    LPC_ORDER, LPC_WINDOW, MIN_WORD_LENGTH, NOISE_CAPTURE_DURATION, NOISE_THRESHOLD_DURATION,
    TARGET_SCALE, ZCR_THRESHOLD,
};
pub use endpoint::{
    DetectorState, EndpointPipeline, EndpointReport, FrameAggregator, NoiseProfiler, Normalizer,
    RunContext, RunTotals, ThresholdClassifier, WordBoundaryDetector,
};
pub use lpc::{LpcAnalysis, LpcAnalyzer, SteadyWindow};
pub use reader::Reader;
pub use writer::Writer;

/// crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// result helpers

/// turn an error into js
fn to_js_err(e: VoxError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// native entry points shared with the wasm api

/// LPC coefficients A[1..=12] of the first 320 samples
///
/// # Arguments
/// * `samples` - At least 320 samples, any amplitude scale
/// * `dc_shift` - Offset subtracted before peak normalization
pub fn lpc_coefficients_native(samples: &[f64], dc_shift: f64) -> VoxResult<Vec<f64>> {
    let analysis = LpcAnalyzer::new()
        .with_dc_shift(dc_shift)
        .analyze_leading(samples)?;
    Ok(analysis.coefficients.as_slice().to_vec())
}

/// Yes/no classification of a recording that starts with ambient noise
pub fn classify_samples_native(samples: &[i32]) -> VoxResult<EndpointReport> {
    EndpointPipeline::new().run(samples)
}

// api functions

/// compute LPC coefficients for javascript callers
///
/// # Returns
/// 12 coefficients, A[1] first
#[wasm_bindgen]
pub fn lpc_coefficients(samples: &[f64], dc_shift: f64) -> Result<Vec<f64>, JsValue> {
    lpc_coefficients_native(samples, dc_shift).map_err(to_js_err)
}

/// classify a recording for javascript callers
///
/// # Arguments
/// * `samples` - 16-bit range integer samples, ambient noise first
///
/// # Returns
/// The endpoint report as a plain JS object
#[wasm_bindgen]
pub fn classify_samples(samples: &[i32]) -> Result<JsValue, JsValue> {
    let report = classify_samples_native(samples).map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// route rust panics to the browser console
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// get lib version
#[wasm_bindgen]
pub fn version() -> String {
    VERSION.to_string()
}
