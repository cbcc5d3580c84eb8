//! Destinations for accepted readings.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::reading::Reading;

/// Receives every complete reading a scanner produces.
pub trait ReadingSink {
    fn accept(&self, reading: &Reading);
}

impl<F> ReadingSink for F
where
    F: Fn(&Reading),
{
    fn accept(&self, reading: &Reading) {
        self(reading)
    }
}

/// Single-slot store holding the newest accepted reading.
///
/// Clones share the same slot: the scanner writes through one handle while
/// any number of readers observe through others.
#[derive(Debug, Clone, Default)]
pub struct LatestReading {
    slot: Arc<RwLock<Option<Reading>>>,
}

impl LatestReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored reading.
    pub fn set(&self, reading: Reading) {
        // A panicked writer cannot leave a half-written Option behind.
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(reading);
    }

    /// Current reading, if any has been accepted.
    pub fn get(&self) -> Option<Reading> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Combined text of the current reading.
    pub fn text(&self) -> Option<String> {
        self.get().map(|r| r.combined())
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl ReadingSink for LatestReading {
    fn accept(&self, reading: &Reading) {
        self.set(reading.clone());
    }
}
