//! polar2tcx - Polar exercise to TCX converter
//!
//! Merges a Polar heart-rate monitor export (heart-rate and speed samples,
//! laps) with an optional GPX track into a single Garmin Training Center
//! (TCX) activity.

pub mod convert;
pub mod export;
pub mod polar;
pub mod storage;
pub mod track;

// Re-export commonly used types
pub use convert::{
    convert, convert_with_timezone, ConvertConfig, ConvertError, ConvertSummary, StartTimeSource,
};
pub use storage::config::AppConfig;
