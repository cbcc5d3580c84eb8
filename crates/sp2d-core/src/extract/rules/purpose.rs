//! Purpose field ("Keperluan Untuk") extraction.
//!
//! The purpose is free text that OCR usually splits across several lines.
//! It starts after the anchor phrase and ends at the first table header that
//! follows it, or at the end of the text.

use regex::Regex;
use tracing::trace;

use super::patterns::{anchor_pattern, MIN_PURPOSE_CHARS, PURPOSE_ANCHOR, STOP_KEYWORDS};
use super::{ExtractionMatch, FieldExtractor};
use crate::error::ExtractionError;

/// Purpose field extractor.
#[derive(Debug, Clone)]
pub struct PurposeExtractor {
    anchor: Regex,
    stop_keywords: Vec<String>,
    min_chars: usize,
}

impl PurposeExtractor {
    /// Create an extractor with the standard anchors and stop keywords.
    pub fn new() -> Self {
        Self {
            anchor: PURPOSE_ANCHOR.clone(),
            stop_keywords: STOP_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            min_chars: MIN_PURPOSE_CHARS,
        }
    }

    /// Replace the anchor phrases.
    pub fn with_anchors<S: AsRef<str>>(mut self, anchors: &[S]) -> Result<Self, ExtractionError> {
        if anchors.is_empty() {
            return Err(ExtractionError::NoAnchors);
        }
        if anchors.iter().any(|a| a.as_ref().trim().is_empty()) {
            return Err(ExtractionError::EmptyKeyword {
                field: "anchors".to_string(),
            });
        }

        self.anchor = Regex::new(&anchor_pattern(anchors))?;
        Ok(self)
    }

    /// Replace the stop keywords. An empty list means the purpose always runs
    /// to the end of the text.
    pub fn with_stop_keywords<S: AsRef<str>>(
        mut self,
        keywords: &[S],
    ) -> Result<Self, ExtractionError> {
        if keywords.iter().any(|k| k.as_ref().is_empty()) {
            return Err(ExtractionError::EmptyKeyword {
                field: "stop_keywords".to_string(),
            });
        }

        self.stop_keywords = keywords.iter().map(|k| k.as_ref().to_string()).collect();
        Ok(self)
    }

    /// Set the length floor; a purpose must be strictly longer than this.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Offset of the earliest stop keyword in `tail`, or its length.
    fn boundary(&self, tail: &str) -> usize {
        self.stop_keywords
            .iter()
            .filter_map(|keyword| tail.find(keyword.as_str()))
            .min()
            .unwrap_or(tail.len())
    }
}

impl Default for PurposeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PurposeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let flat = flatten_line_breaks(text);

        let anchor = self.anchor.find(&flat)?;
        let tail = &flat[anchor.end()..];
        let end = anchor.end() + self.boundary(tail);

        let candidate = &flat[anchor.end()..end];
        let purpose = candidate.replace(':', "");
        let purpose = purpose.trim();

        if purpose.chars().count() <= self.min_chars {
            trace!("Purpose candidate too short: {:?}", purpose);
            return None;
        }

        // Line breaks are single bytes, so spans in `flat` are valid in `text`.
        Some(
            ExtractionMatch::new(purpose.to_string(), candidate)
                .with_position(anchor.end(), end),
        )
    }
}

/// Extract the purpose description from text.
pub fn extract_purpose(text: &str) -> Option<String> {
    PurposeExtractor::new().extract(text).map(|m| m.value)
}

/// Replace every `\n` and `\r` with a single space.
pub fn flatten_line_breaks(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_inline_purpose() {
        let text = "SP2D Keperluan Untuk: Pembayaran gaji pegawai bulan Januari NO. REKENING 123 JUMLAH";
        assert_eq!(
            extract_purpose(text),
            Some("Pembayaran gaji pegawai bulan Januari".to_string())
        );
    }

    #[test]
    fn test_extract_multiline_purpose() {
        let text = "Keperluan Untuk\nPembayaran honorarium\r\ntim kerja\nURAIAN";
        assert_eq!(
            extract_purpose(text),
            Some("Pembayaran honorarium  tim kerja".to_string())
        );
    }

    #[test]
    fn test_anchor_is_case_insensitive() {
        assert_eq!(
            extract_purpose("KEPERLUAN UNTUK : Belanja ATK kantor"),
            Some("Belanja ATK kantor".to_string())
        );
        assert_eq!(
            extract_purpose("Purpose for: office supplies REKENING"),
            Some("office supplies".to_string())
        );
    }

    #[test]
    fn test_missing_anchor() {
        assert_eq!(extract_purpose("Pembayaran gaji pegawai NO. REKENING"), None);
        assert_eq!(extract_purpose("Keperluan: Pembayaran gaji"), None);
        assert_eq!(extract_purpose(""), None);
    }

    #[test]
    fn test_earliest_stop_keyword_wins() {
        let text = "Keperluan Untuk Belanja pegawai JUMLAH 100 NO. 1 REKENING";
        assert_eq!(extract_purpose(text), Some("Belanja pegawai".to_string()));

        let text = "Keperluan Untuk Belanja pegawai Potongan pajak URAIAN";
        assert_eq!(extract_purpose(text), Some("Belanja pegawai".to_string()));
    }

    #[test]
    fn test_stop_keywords_are_case_sensitive() {
        let text = "Keperluan Untuk Pembayaran sesuai no. kontrak 12 jumlah termin NO. REKENING";
        assert_eq!(
            extract_purpose(text),
            Some("Pembayaran sesuai no. kontrak 12 jumlah termin".to_string())
        );
    }

    #[test]
    fn test_runs_to_end_without_stop_keyword() {
        assert_eq!(
            extract_purpose("Keperluan Untuk: Pengadaan laptop  \n"),
            Some("Pengadaan laptop".to_string())
        );
    }

    #[test]
    fn test_all_colons_removed() {
        assert_eq!(
            extract_purpose("Keperluan Untuk :: Termin: 2 pekerjaan jalan :"),
            Some("Termin 2 pekerjaan jalan".to_string())
        );
    }

    #[test]
    fn test_length_floor() {
        // Exactly five characters is rejected, six is accepted.
        assert_eq!(extract_purpose("Keperluan Untuk: Gajii NO."), None);
        assert_eq!(
            extract_purpose("Keperluan Untuk: Gajian NO."),
            Some("Gajian".to_string())
        );
        assert_eq!(extract_purpose("Keperluan Untuk NO. REKENING"), None);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five characters, ten bytes.
        assert_eq!(extract_purpose("Keperluan Untuk: ééééé"), None);
    }

    #[test]
    fn test_first_anchor_occurrence_used() {
        let text = "Keperluan Untuk: Belanja modal NO. 1 Keperluan Untuk: Belanja barang";
        assert_eq!(extract_purpose(text), Some("Belanja modal".to_string()));
    }

    #[test]
    fn test_match_position_refers_to_source() {
        let text = "Keperluan Untuk\nBelanja modal\nNO.";
        let m = PurposeExtractor::new().extract(text).unwrap();
        let (start, end) = m.position.unwrap();
        assert_eq!(&text[start..end], "\nBelanja modal\n");
    }

    #[test]
    fn test_custom_configuration() {
        let extractor = PurposeExtractor::new()
            .with_anchors(&["Untuk Keperluan"])
            .unwrap()
            .with_stop_keywords(&["Total"])
            .unwrap()
            .with_min_chars(2);

        assert_eq!(
            extractor.extract("Untuk Keperluan: ATK Total 5").map(|m| m.value),
            Some("ATK".to_string())
        );
        assert!(extractor.extract("Keperluan Untuk: ATK").is_none());
    }

    #[test]
    fn test_invalid_configuration() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            PurposeExtractor::new().with_anchors(&empty),
            Err(ExtractionError::NoAnchors)
        ));
        assert!(matches!(
            PurposeExtractor::new().with_anchors(&[" "]),
            Err(ExtractionError::EmptyKeyword { .. })
        ));
        assert!(matches!(
            PurposeExtractor::new().with_stop_keywords(&["NO.", ""]),
            Err(ExtractionError::EmptyKeyword { .. })
        ));
    }

    #[test]
    fn test_flatten_line_breaks() {
        assert_eq!(flatten_line_breaks("a\nb\r\nc"), "a b  c");
    }
}
