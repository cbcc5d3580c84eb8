//! WASM bindings for SP2D field extraction.
//!
//! The browser host owns the camera and the OCR engine; it passes each
//! recognized text here and displays whatever reading is current.

use wasm_bindgen::prelude::*;

use sp2d_core::{ExtractionConfig, FrameScanner, LatestReading, Sp2dExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract `"<number> <purpose>"` from OCR text, or `undefined`.
#[wasm_bindgen]
pub fn extract_sp2d(text: &str) -> Option<String> {
    sp2d_core::extract_sp2d(text).text()
}

/// Extract both fields as `{ document_number, purpose }`, or `null`.
#[wasm_bindgen]
pub fn extract_sp2d_fields(text: &str) -> Result<JsValue, JsValue> {
    match sp2d_core::extract_sp2d(text).into_reading() {
        Some(reading) => serde_wasm_bindgen::to_value(&reading)
            .map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(JsValue::NULL),
    }
}

/// Stateful scanner for a live OCR stream.
///
/// Feed every recognized frame to `push_frame`; `latest` always returns the
/// newest complete reading and is never cleared by an empty frame.
#[wasm_bindgen]
pub struct Sp2dScanner {
    scanner: FrameScanner<LatestReading>,
    accepted_at: Option<f64>,
}

#[wasm_bindgen]
impl Sp2dScanner {
    /// Create a scanner for the standard SP2D layout.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_extractor(Sp2dExtractor::new())
    }

    /// Create a scanner from a JSON extraction config.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<Sp2dScanner, JsValue> {
        let config: ExtractionConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let extractor = Sp2dExtractor::from_config(&config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self::with_extractor(extractor))
    }

    /// Process one OCR frame. Returns true if it produced a complete reading.
    #[wasm_bindgen]
    pub fn push_frame(&mut self, text: &str) -> bool {
        let before = self.scanner.stats().changes;
        let complete = self.scanner.process_frame(text).is_complete();

        if complete {
            self.accepted_at = Some(now_ms());
            if self.scanner.stats().changes != before {
                log(&format!("SP2D reading updated: {}", self.latest().unwrap_or_default()));
            }
        }

        complete
    }

    /// The newest complete reading, if any.
    #[wasm_bindgen]
    pub fn latest(&self) -> Option<String> {
        self.scanner.sink().text()
    }

    /// Timestamp (ms since epoch) of the newest complete reading.
    #[wasm_bindgen]
    pub fn accepted_at(&self) -> Option<f64> {
        self.accepted_at
    }

    /// Number of frames processed so far.
    #[wasm_bindgen]
    pub fn frames_seen(&self) -> f64 {
        self.scanner.stats().frames as f64
    }

    /// Scan counters as `{ frames, complete, empty, changes }`.
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.scanner.stats())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Sp2dScanner {
    fn with_extractor(extractor: Sp2dExtractor) -> Self {
        Self {
            scanner: FrameScanner::new(extractor, LatestReading::new()),
            accepted_at: None,
        }
    }
}

impl Default for Sp2dScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    0.0
}

#[cfg(target_arch = "wasm32")]
fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_message: &str) {}
