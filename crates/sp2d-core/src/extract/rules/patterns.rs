//! Patterns and keyword sets for the SP2D print layout.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker token inside the reference number (`05861/SP2D/...`).
pub const DEFAULT_MARKER: &str = "SP2D";

/// Phrases opening the purpose field.
pub const ANCHOR_PHRASES: &[&str] = &["Keperluan Untuk", "Purpose For"];

/// Table headers that follow the purpose field. Matched case-sensitively so
/// that "NO." does not fire on ordinary words such as "nomor".
pub const STOP_KEYWORDS: &[&str] = &["NO.", "REKENING", "URAIAN", "JUMLAH", "Potongan"];

/// A purpose must be strictly longer than this many characters.
pub const MIN_PURPOSE_CHARS: usize = 5;

lazy_static! {
    // Reference number: 4-6 digits / SP2D / code, OCR may insert spaces around slashes
    pub static ref DOCUMENT_NUMBER: Regex = Regex::new(
        &document_number_pattern(DEFAULT_MARKER)
    ).unwrap();

    pub static ref PURPOSE_ANCHOR: Regex = Regex::new(
        &anchor_pattern(ANCHOR_PHRASES)
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Build the reference number pattern for a marker token.
///
/// Case folding is ASCII-only: with Unicode folding `ſ` (U+017F) would match
/// `S` and the Kelvin sign (U+212A) would match `K`.
pub fn document_number_pattern(marker: &str) -> String {
    format!(
        r"([0-9]{{4,6}}(?-u:\s)*/(?-u:\s)*{}(?-u:\s)*/(?-u:\s)*[A-Za-z0-9./-]+)",
        ascii_case_insensitive(marker)
    )
}

/// Build an ASCII case-insensitive alternation over anchor phrases.
pub fn anchor_pattern<S: AsRef<str>>(anchors: &[S]) -> String {
    let alternatives: Vec<String> = anchors
        .iter()
        .map(|a| ascii_case_insensitive(a.as_ref()))
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

/// Escape a literal, turning each ASCII letter into a two-case class.
/// Non-ASCII characters match only themselves.
fn ascii_case_insensitive(literal: &str) -> String {
    let mut pattern = String::with_capacity(literal.len() * 4);
    for c in literal.chars() {
        if c.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(c.to_ascii_uppercase());
            pattern.push(c.to_ascii_lowercase());
            pattern.push(']');
        } else {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }
    pattern
}
