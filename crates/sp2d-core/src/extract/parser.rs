//! SP2D extractor combining the number and purpose rules.

use lazy_static::lazy_static;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::reading::ExtractionResult;

use super::rules::{DocumentNumberExtractor, FieldExtractor, PurposeExtractor};

lazy_static! {
    static ref DEFAULT_EXTRACTOR: Sp2dExtractor = Sp2dExtractor::new();
}

/// Extracts a complete SP2D reading from raw OCR text.
///
/// The extractor holds only compiled patterns and keyword lists, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Sp2dExtractor {
    number: DocumentNumberExtractor,
    purpose: PurposeExtractor,
}

impl Sp2dExtractor {
    /// Create an extractor for the standard SP2D layout.
    pub fn new() -> Self {
        Self {
            number: DocumentNumberExtractor::new(),
            purpose: PurposeExtractor::new(),
        }
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        if config.stop_keywords.is_empty() {
            warn!("No stop keywords configured, purpose runs to the end of each frame");
        }

        let number = DocumentNumberExtractor::with_marker(&config.marker)?;
        let purpose = PurposeExtractor::new()
            .with_anchors(&config.anchors)?
            .with_stop_keywords(&config.stop_keywords)?
            .with_min_chars(config.min_purpose_chars);

        Ok(Self { number, purpose })
    }

    /// Extract both fields from one OCR frame.
    ///
    /// Never fails: anything short of both fields is `Empty`.
    pub fn extract(&self, raw_text: &str) -> ExtractionResult {
        let number = self.number.extract(raw_text).map(|m| m.value);
        let purpose = self.purpose.extract(raw_text).map(|m| m.value);

        match (&number, &purpose) {
            (Some(_), Some(_)) => {}
            (Some(n), None) => debug!("Found document number {} but no purpose", n),
            (None, Some(_)) => debug!("Found purpose but no document number"),
            (None, None) => debug!("No SP2D fields in {} chars of text", raw_text.len()),
        }

        ExtractionResult::combine(number, purpose)
    }
}

/// Extract a reading with the standard SP2D layout.
pub fn extract_sp2d(raw_text: &str) -> ExtractionResult {
    DEFAULT_EXTRACTOR.extract(raw_text)
}
