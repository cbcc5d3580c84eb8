//! SP2D reference number extraction.

use regex::Regex;

use super::patterns::{document_number_pattern, DOCUMENT_NUMBER, WHITESPACE};
use super::{ExtractionMatch, FieldExtractor};
use crate::error::ExtractionError;

/// Reference number extractor.
///
/// Only the leftmost match is reported by [`FieldExtractor::extract`]; the
/// number is printed once near the top of the document.
#[derive(Debug, Clone)]
pub struct DocumentNumberExtractor {
    pattern: Regex,
}

impl DocumentNumberExtractor {
    /// Create an extractor for the standard `SP2D` marker.
    pub fn new() -> Self {
        Self {
            pattern: DOCUMENT_NUMBER.clone(),
        }
    }

    /// Create an extractor for a different marker token.
    pub fn with_marker(marker: &str) -> Result<Self, ExtractionError> {
        let marker = marker.trim();
        if marker.is_empty() {
            return Err(ExtractionError::EmptyKeyword {
                field: "marker".to_string(),
            });
        }

        Ok(Self {
            pattern: Regex::new(&document_number_pattern(marker))?,
        })
    }

    /// Every match in the text, in order of appearance.
    pub fn extract_all(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(normalize_document_number(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

impl Default for DocumentNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DocumentNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let m = self.pattern.find(text)?;
        Some(
            ExtractionMatch::new(normalize_document_number(m.as_str()), m.as_str())
                .with_position(m.start(), m.end()),
        )
    }
}

/// Extract the reference number from text.
pub fn extract_document_number(text: &str) -> Option<String> {
    DocumentNumberExtractor::new().extract(text).map(|m| m.value)
}

/// Remove every whitespace run (`05861 / SP2D / A` -> `05861/SP2D/A`).
pub fn normalize_document_number(raw: &str) -> String {
    WHITESPACE.replace_all(raw, "").into_owned()
}
