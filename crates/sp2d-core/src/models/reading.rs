//! Extraction result model.
//!
//! A frame either yields a full [`Reading`] (document number and purpose) or
//! nothing at all. There is no partially filled variant: a half-read
//! document must never replace a previously accepted one.

use std::fmt;

use serde::Serialize;

/// A complete SP2D reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reading {
    /// Reference number with whitespace removed, e.g. `05861/SP2D/DPA-2024`.
    document_number: String,

    /// Purpose description ("Keperluan Untuk" field).
    purpose: String,
}

impl Reading {
    /// Reference number of the disbursement order.
    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    /// Purpose description.
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Number and purpose joined by a single space.
    pub fn combined(&self) -> String {
        format!("{} {}", self.document_number, self.purpose)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.document_number, self.purpose)
    }
}

/// Outcome of extracting one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// Both fields were found.
    Complete(Reading),
    /// The frame did not yield a usable field set.
    Empty,
}

impl ExtractionResult {
    /// Merge the two sub-extractions.
    ///
    /// Returns `Complete` only when both parts are present and non-empty.
    pub fn combine(document_number: Option<String>, purpose: Option<String>) -> Self {
        match (document_number, purpose) {
            (Some(document_number), Some(purpose))
                if !document_number.is_empty() && !purpose.is_empty() =>
            {
                Self::Complete(Reading {
                    document_number,
                    purpose,
                })
            }
            _ => Self::Empty,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Borrow the reading, if complete.
    pub fn reading(&self) -> Option<&Reading> {
        match self {
            Self::Complete(reading) => Some(reading),
            Self::Empty => None,
        }
    }

    /// Take the reading, if complete.
    pub fn into_reading(self) -> Option<Reading> {
        match self {
            Self::Complete(reading) => Some(reading),
            Self::Empty => None,
        }
    }

    /// Combined text of a complete reading.
    pub fn text(&self) -> Option<String> {
        self.reading().map(Reading::combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_combine_both_present() {
        let result = ExtractionResult::combine(some("05861/SP2D/DPA-2024"), some("Pembayaran gaji"));
        assert!(result.is_complete());
        assert_eq!(
            result.text(),
            Some("05861/SP2D/DPA-2024 Pembayaran gaji".to_string())
        );
    }

    #[test]
    fn test_combine_presence_combinations() {
        let cases = [
            (None, None, false),
            (some("05861/SP2D/X"), None, false),
            (None, some("Pembayaran gaji"), false),
            (some("05861/SP2D/X"), some("Pembayaran gaji"), true),
        ];

        for (number, purpose, complete) in cases {
            let result = ExtractionResult::combine(number.clone(), purpose.clone());
            assert_eq!(result.is_complete(), complete, "{number:?} / {purpose:?}");
        }
    }

    #[test]
    fn test_combine_rejects_empty_strings() {
        assert_eq!(
            ExtractionResult::combine(some(""), some("Pembayaran gaji")),
            ExtractionResult::Empty
        );
        assert_eq!(
            ExtractionResult::combine(some("05861/SP2D/X"), some("")),
            ExtractionResult::Empty
        );
    }

    #[test]
    fn test_reading_accessors() {
        let reading = ExtractionResult::combine(some("12345/SP2D/A"), some("Belanja modal"))
            .into_reading()
            .unwrap();

        assert_eq!(reading.document_number(), "12345/SP2D/A");
        assert_eq!(reading.purpose(), "Belanja modal");
        assert_eq!(reading.to_string(), reading.combined());
    }

    #[test]
    fn test_reading_serializes_fields() {
        let reading = ExtractionResult::combine(some("12345/SP2D/A"), some("Belanja modal"))
            .into_reading()
            .unwrap();

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["document_number"], "12345/SP2D/A");
        assert_eq!(json["purpose"], "Belanja modal");
    }
}
