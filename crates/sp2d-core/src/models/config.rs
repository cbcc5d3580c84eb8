//! Configuration structures for extraction and frame scanning.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::extract::Sp2dExtractor;
use crate::extract::rules::patterns::{ANCHOR_PHRASES, DEFAULT_MARKER, MIN_PURPOSE_CHARS, STOP_KEYWORDS};

/// Main configuration for the sp2d pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sp2dConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Frame scanning configuration.
    pub scan: ScanConfig,
}

/// Field extraction configuration.
///
/// The defaults reproduce the SP2D document layout; changing them is only
/// needed for a different print template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Marker token between the two slashes of the reference number.
    pub marker: String,

    /// Phrases that open the purpose field (case-insensitive).
    pub anchors: Vec<String>,

    /// Table-header tokens that close the purpose field (case-sensitive).
    pub stop_keywords: Vec<String>,

    /// A purpose must be strictly longer than this many characters.
    pub min_purpose_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            anchors: ANCHOR_PHRASES.iter().map(|s| s.to_string()).collect(),
            stop_keywords: STOP_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            min_purpose_chars: MIN_PURPOSE_CHARS,
        }
    }
}

/// Frame stream configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Separator between frames when several are stored in one text file.
    pub frame_delimiter: String,

    /// Number of frames buffered between producer and worker.
    pub channel_capacity: usize,

    /// Drop a frame instead of waiting when the worker is busy.
    pub drop_stale_frames: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            frame_delimiter: "\u{000C}".to_string(),
            channel_capacity: 8,
            drop_stale_frames: false,
        }
    }
}

impl Sp2dConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the extractor described by the extraction section.
    pub fn extractor(&self) -> Result<Sp2dExtractor> {
        Ok(Sp2dExtractor::from_config(&self.extraction)?)
    }
}
