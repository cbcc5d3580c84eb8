//! Frame scanning over a stream of OCR outputs.
//!
//! Extraction returns immutable values; what happens to a complete reading
//! is decided by the [`ReadingSink`] the caller injects. [`LatestReading`]
//! is the usual choice: a single slot where the newest reading replaces the
//! previous one and empty frames leave it untouched.

mod sink;

pub use sink::{LatestReading, ReadingSink};

use serde::Serialize;
use tracing::{debug, info};

use crate::extract::Sp2dExtractor;
use crate::models::reading::{ExtractionResult, Reading};

/// Counters for a scanning session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Frames processed.
    pub frames: u64,
    /// Frames that produced a complete reading.
    pub complete: u64,
    /// Frames that produced nothing.
    pub empty: u64,
    /// Times the accepted reading changed value.
    pub changes: u64,
}

/// Runs the extractor on successive frames and forwards complete readings.
pub struct FrameScanner<S> {
    extractor: Sp2dExtractor,
    sink: S,
    stats: ScanStats,
    last: Option<Reading>,
}

impl<S: ReadingSink> FrameScanner<S> {
    pub fn new(extractor: Sp2dExtractor, sink: S) -> Self {
        Self {
            extractor,
            sink,
            stats: ScanStats::default(),
            last: None,
        }
    }

    /// Extract one frame. Complete readings are handed to the sink before
    /// being returned; empty frames never reach it.
    pub fn process_frame(&mut self, raw_text: &str) -> ExtractionResult {
        self.stats.frames += 1;

        let result = self.extractor.extract(raw_text);
        match &result {
            ExtractionResult::Complete(reading) => {
                self.stats.complete += 1;
                if self.last.as_ref() != Some(reading) {
                    self.stats.changes += 1;
                    info!(
                        "Accepted SP2D {} on frame {}",
                        reading.document_number(),
                        self.stats.frames
                    );
                    self.last = Some(reading.clone());
                }
                self.sink.accept(reading);
            }
            ExtractionResult::Empty => {
                self.stats.empty += 1;
                debug!("Frame {} yielded no complete reading", self.stats.frames);
            }
        }

        result
    }

    /// Most recent reading this scanner accepted.
    pub fn latest(&self) -> Option<&Reading> {
        self.last.as_ref()
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const FIRST: &str = "05861 / SP2D / DPA-2024\nKeperluan Untuk\nPembayaran honorarium tim kerja\nNO. REKENING";
    const SECOND: &str = "00417/SP2D/LS-2024 Keperluan Untuk: Belanja modal gedung NO.";

    #[test]
    fn test_empty_frames_do_not_overwrite() {
        let latest = LatestReading::new();
        let mut scanner = FrameScanner::new(Sp2dExtractor::new(), latest.clone());

        scanner.process_frame("blurry");
        assert_eq!(latest.get(), None);

        scanner.process_frame(FIRST);
        scanner.process_frame("05861/SP2D/DPA-2024 only the number");
        scanner.process_frame("");

        assert_eq!(
            latest.text(),
            Some("05861/SP2D/DPA-2024 Pembayaran honorarium tim kerja".to_string())
        );
    }

    #[test]
    fn test_last_write_wins() {
        let latest = LatestReading::new();
        let mut scanner = FrameScanner::new(Sp2dExtractor::new(), latest.clone());

        scanner.process_frame(FIRST);
        scanner.process_frame(SECOND);

        assert_eq!(
            latest.text(),
            Some("00417/SP2D/LS-2024 Belanja modal gedung".to_string())
        );
        assert_eq!(scanner.latest(), latest.get().as_ref());
    }

    #[test]
    fn test_stats() {
        let mut scanner = FrameScanner::new(Sp2dExtractor::new(), LatestReading::new());

        for frame in [FIRST, "noise", FIRST, SECOND, "", SECOND] {
            scanner.process_frame(frame);
        }

        assert_eq!(
            scanner.stats(),
            ScanStats {
                frames: 6,
                complete: 4,
                empty: 2,
                changes: 2,
            }
        );
    }

    #[test]
    fn test_closure_sink_sees_only_complete_readings() {
        let seen = RefCell::new(Vec::new());
        let sink = |reading: &Reading| seen.borrow_mut().push(reading.combined());
        let mut scanner = FrameScanner::new(Sp2dExtractor::new(), sink);

        scanner.process_frame("noise");
        scanner.process_frame(FIRST);
        scanner.process_frame("Keperluan Untuk: tanpa nomor");
        scanner.process_frame(FIRST);
        drop(scanner);

        assert_eq!(
            seen.into_inner(),
            vec![
                "05861/SP2D/DPA-2024 Pembayaran honorarium tim kerja".to_string(),
                "05861/SP2D/DPA-2024 Pembayaran honorarium tim kerja".to_string(),
            ]
        );
    }

    #[test]
    fn test_process_frame_returns_result() {
        let mut scanner = FrameScanner::new(Sp2dExtractor::new(), LatestReading::new());
        assert!(scanner.process_frame(FIRST).is_complete());
        assert_eq!(scanner.process_frame("noise"), ExtractionResult::Empty);
    }
}
