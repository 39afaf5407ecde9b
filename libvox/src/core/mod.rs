pub mod analysis;
pub mod audio_constants;
pub mod config;
pub mod error;
pub mod types;

pub use analysis::*;
pub use audio_constants::*;
pub use config::{AnalysisConfig, EndpointConfig, LpcConfig};
pub use error::{VoxError, VoxResult};
pub use types::*;
