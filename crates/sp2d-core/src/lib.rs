//! Core library for SP2D (Surat Perintah Pencairan Dana) field extraction.
//!
//! This crate provides:
//! - Reference number and purpose extraction from raw OCR text
//! - An all-or-nothing [`ExtractionResult`] per frame
//! - Frame scanning with an injected sink for the latest accepted reading
//! - Configuration for the keyword set and stream handling

pub mod error;
pub mod extract;
pub mod models;
pub mod scan;

pub use error::{ExtractionError, Result, Sp2dError};
pub use extract::{extract_sp2d, Sp2dExtractor};
pub use models::config::{ExtractionConfig, ScanConfig, Sp2dConfig};
pub use models::reading::{ExtractionResult, Reading};
pub use scan::{FrameScanner, LatestReading, ReadingSink, ScanStats};
