//! endpoint detection and energy/ZCR features for yes/no classification
//!
//! noise profile -> word boundaries -> normalization -> frames -> threshold
mod classifier;
mod detector;
mod frames;
mod noise;
mod normalizer;
mod pipeline;
mod types;

pub use classifier::ThresholdClassifier;
pub use detector::WordBoundaryDetector;
pub use frames::FrameAggregator;
pub use noise::NoiseProfiler;
pub use normalizer::Normalizer;
pub use pipeline::{EndpointPipeline, EndpointReport, RunContext};
pub use types::{DetectorState, RunTotals};

#[cfg(test)]
mod tests;
