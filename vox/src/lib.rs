//! vox - LPC analysis and yes/no classification of recorded speech
//!
//! File handling around `libvox-speech`: loading text or audio recordings,
//! config files, and the JSON reports printed by the `vox` binary.

pub mod audio;

use anyhow::{bail, Context, Result};
use libvox_speech::core::{duration_secs, mean, mean_f64, peak_abs, CAPTURE_SAMPLE_RATE};
use libvox_speech::{
    AnalysisConfig, EndpointConfig, EndpointPipeline, EndpointReport, LpcAnalysis, LpcAnalyzer,
    LpcCoefficients, LpcConfig, Reader, WordSegment, LPC_ORDER,
};
use serde::Serialize;
use std::path::Path;

/// Re-export the core library
pub use libvox_speech;

/// File extensions read as whitespace- or comma-delimited decimal samples
const TEXT_EXTENSIONS: &[&str] = &["txt", "dat", "csv"];

/// Samples loaded from disk
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub samples: Vec<i32>,
    pub sample_rate: u32,
}

fn is_text_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

/// Load integer samples from a text file or any audio format symphonia reads
///
/// Text files carry no sample rate; they are assumed to be at the capture
/// rate.
pub fn load_recording(path: &Path) -> Result<Recording> {
    if is_text_file(path) {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let samples = Reader::new()
            .read_i32(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        return Ok(Recording {
            samples,
            sample_rate: CAPTURE_SAMPLE_RATE,
        });
    }

    let decoded = audio::read_audio_file(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(Recording {
        samples: decoded.samples,
        sample_rate: decoded.sample_rate,
    })
}

/// Load real-valued samples for LPC analysis
pub fn load_real_samples(path: &Path) -> Result<Vec<f64>> {
    if is_text_file(path) {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Reader::new()
            .read_f64(&text)
            .with_context(|| format!("Failed to parse {}", path.display()));
    }

    let recording = load_recording(path)?;
    Ok(recording.samples.iter().map(|&s| s as f64).collect())
}

/// Read an analysis config file, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    AnalysisConfig::from_json(&text)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// DC shift measured as the mean of a reference recording
pub fn dc_shift_from_reference(path: &Path) -> Result<f64> {
    let samples = load_real_samples(path)?;
    let Some(dc_shift) = mean_f64(&samples) else {
        bail!("DC reference {} has no samples", path.display());
    };
    Ok(dc_shift)
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Coefficients of one analyzed window
#[derive(Debug, Clone, Serialize)]
pub struct LpcWindowReport {
    pub window_index: usize,
    pub start: usize,
    /// A[1..=12]
    pub coefficients: LpcCoefficients,
    pub reflection: [f64; LPC_ORDER],
    pub prediction_error: f64,
    pub stable: bool,
}

impl LpcWindowReport {
    fn new(window_index: usize, start: usize, analysis: &LpcAnalysis) -> Self {
        Self {
            window_index,
            start,
            coefficients: analysis.coefficients,
            reflection: analysis.reflection,
            prediction_error: analysis.prediction_error,
            stable: analysis.stable,
        }
    }
}

/// Result of `vox lpc`
#[derive(Debug, Clone, Serialize)]
pub struct LpcReport {
    pub generated_at: String,
    pub source: String,
    pub dc_shift: f64,
    pub steady: bool,
    pub windows: Vec<LpcWindowReport>,
}

/// LPC coefficients for the first window, or for the steady middle windows
pub fn analyze_lpc(samples: &[f64], config: &LpcConfig, steady: bool) -> Result<Vec<LpcWindowReport>> {
    let analyzer = LpcAnalyzer::with_config(config.clone())?;

    if steady {
        let windows = analyzer
            .analyze_steady(samples)
            .context("Steady-window analysis failed")?;
        return Ok(windows
            .iter()
            .map(|w| LpcWindowReport::new(w.window_index, w.start, &w.analysis))
            .collect());
    }

    let analysis = analyzer
        .analyze_leading(samples)
        .context("LPC analysis failed")?;
    Ok(vec![LpcWindowReport::new(0, 0, &analysis)])
}

/// Build the `vox lpc` report for a file
pub fn lpc_report(
    path: &Path,
    config: &LpcConfig,
    dc_reference: Option<&Path>,
    steady: bool,
) -> Result<LpcReport> {
    let mut config = config.clone();
    if let Some(reference) = dc_reference {
        config.dc_shift = dc_shift_from_reference(reference)?;
    }

    let samples = load_real_samples(path)?;
    let windows = analyze_lpc(&samples, &config, steady)?;

    Ok(LpcReport {
        generated_at: timestamp(),
        source: path.display().to_string(),
        dc_shift: config.dc_shift,
        steady,
        windows,
    })
}

/// Result of `vox classify`
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub generated_at: String,
    pub source: String,
    pub sample_rate: u32,
    pub word: String,
    #[serde(flatten)]
    pub report: EndpointReport,
}

/// Run the endpoint pipeline, optionally with a separate noise recording
pub fn classify(
    samples: &[i32],
    noise: Option<&[i32]>,
    config: &EndpointConfig,
) -> Result<EndpointReport> {
    let pipeline = EndpointPipeline::with_config(config.clone())?;
    let report = match noise {
        Some(noise) => pipeline.run_with_noise(noise, samples),
        None => pipeline.run(samples),
    };
    report.context("Classification failed")
}

/// Build the `vox classify` report for a file
pub fn classify_report(
    path: &Path,
    noise_path: Option<&Path>,
    config: &EndpointConfig,
) -> Result<ClassifyReport> {
    let recording = load_recording(path)?;
    let noise = noise_path.map(load_recording).transpose()?;

    let report = classify(
        &recording.samples,
        noise.as_ref().map(|n| n.samples.as_slice()),
        config,
    )?;

    Ok(ClassifyReport {
        generated_at: timestamp(),
        source: path.display().to_string(),
        sample_rate: recording.sample_rate,
        word: report.result.label.as_word().to_string(),
        report,
    })
}

/// Find the word in a recording without classifying it
pub fn extract_word(
    samples: &[i32],
    noise: Option<&[i32]>,
    config: &EndpointConfig,
) -> Result<WordSegment> {
    let pipeline = EndpointPipeline::with_config(config.clone())?;
    let detected = match noise {
        Some(noise) => pipeline.detect_word_with_noise(noise, samples),
        None => pipeline.detect_word(samples),
    };
    let (_, segment) = detected.context("Word detection failed")?;
    Ok(segment)
}

/// Summary shown by `vox info`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingInfo {
    pub sample_count: usize,
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub peak: i32,
    pub mean: f64,
}

pub fn recording_info(recording: &Recording) -> RecordingInfo {
    RecordingInfo {
        sample_count: recording.samples.len(),
        sample_rate: recording.sample_rate,
        duration_secs: duration_secs(recording.samples.len(), recording.sample_rate),
        peak: peak_abs(&recording.samples),
        mean: mean(&recording.samples).unwrap_or(0.0),
    }
}
