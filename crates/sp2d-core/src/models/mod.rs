//! Data models: extraction results and configuration.

pub mod config;
pub mod reading;

pub use config::{ExtractionConfig, ScanConfig, Sp2dConfig};
pub use reading::{ExtractionResult, Reading};
