use thiserror::Error;

/// Errors returned by the analysis pipelines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoxError {
    /// wrong window size handed to the autocorrelation estimator
    #[error("invalid input length: expected {expected} samples, got {got}")]
    InvalidInputLength { expected: usize, got: usize },

    /// zero energy or zero normalization divisor
    #[error("degenerate signal: {0}")]
    DegenerateSignal(String),

    /// no word boundary found before the stream ended
    #[error("detection failed: {0}")]
    DetectionFailed(String),

    /// unparsable token in a text sample stream
    #[error("parse error on line {line}: {token:?} is not a number")]
    Parse { line: usize, token: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl VoxError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        VoxError::DegenerateSignal(reason.into())
    }

    pub(crate) fn detection_failed(reason: impl Into<String>) -> Self {
        VoxError::DetectionFailed(reason.into())
    }
}

/// result type for vox stuff
pub type VoxResult<T> = Result<T, VoxError>;
