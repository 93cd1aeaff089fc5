//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing key edges to the logger (UART /
//! USB-CDC in production).  Anything that wants to act on key presses,
//! such as a menu driver, implements the same trait.

use log::info;

use crate::events::KeyEvent;
use crate::ports::EventSink;

/// Adapter that logs every [`KeyEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &KeyEvent) {
        info!("KEY | {}", event);
    }
}
