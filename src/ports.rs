//! Port traits: the boundary between the detector and the hardware.
//!
//! ```text
//!   AnalogReader ──┐
//!                  ├──▶ KeyDetector ──▶ EventSink
//!  DigitalReader ──┘        ▲
//!                        DelayNs
//! ```
//!
//! Readers are infallible by contract: a disconnected or noisy pin simply
//! produces a reading.  Adapters that sit on fallible HALs decide what a
//! failed read reports (see [`PinBank`](crate::adapters::pin_bank::PinBank)).
//! The debounce wait is injected as an [`embedded_hal::delay::DelayNs`].

use crate::channel::Source;
use crate::events::KeyEvent;

/// Quantized level of an analog source (raw ADC counts).
pub trait AnalogReader {
    fn read_analog(&mut self, source: Source) -> u16;
}

/// Binary level of a digital source; `true` = high.
pub trait DigitalReader {
    fn read_digital(&mut self, source: Source) -> bool;
}

/// Receives the edge events of each scan.
pub trait EventSink {
    fn emit(&mut self, event: &KeyEvent);
}

impl<T: AnalogReader + ?Sized> AnalogReader for &mut T {
    fn read_analog(&mut self, source: Source) -> u16 {
        (**self).read_analog(source)
    }
}

impl<T: DigitalReader + ?Sized> DigitalReader for &mut T {
    fn read_digital(&mut self, source: Source) -> bool {
        (**self).read_digital(source)
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: &KeyEvent) {
        (**self).emit(event);
    }
}
