//! Linear predictive coding of fixed 320-sample windows
//!
//! Autocorrelation up to lag 12, then the Levinson-Durbin recursion for an
//! order-12 predictor.

pub mod analyzer;
pub mod durbin;
pub mod steady;

pub use analyzer::{LpcAnalysis, LpcAnalyzer};
pub use durbin::{autocorrelation, levinson_durbin, prediction_error, synthesize, DurbinSolution};
pub use steady::{select_steady_windows, SteadyWindow};
