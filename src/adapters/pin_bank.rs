//! Digital reader over a bank of embedded-hal input pins.
//!
//! The channel `source` is the pin's index in the bank.  HAL read errors
//! and unknown sources report the *released* level so a faulty pin can
//! never latch a phantom press.

use embedded_hal::digital::{Error as _, InputPin};
use heapless::Vec;
use log::warn;

use crate::channel::Source;
use crate::error::{ConfigError, Result};
use crate::ports::{AnalogReader, DigitalReader};

/// Fixed-capacity bank of input pins.
pub struct PinBank<P, const N: usize> {
    pins: Vec<P, N>,
    released_level: bool,
}

impl<P: InputPin, const N: usize> PinBank<P, N> {
    /// Empty bank.  `pullup` selects the released level: high for
    /// pull-up wiring, low for pull-down.
    pub fn new(pullup: bool) -> Self {
        Self {
            pins: Vec::new(),
            released_level: pullup,
        }
    }

    /// Add a pin and return the source index to use in a [`Channel`](crate::channel::Channel).
    pub fn push(&mut self, pin: P) -> Result<Source> {
        let index = self.pins.len() as Source;
        self.pins.push(pin).map_err(|_| ConfigError::TableFull)?;
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Hand the pins back to the caller.
    pub fn into_pins(self) -> Vec<P, N> {
        self.pins
    }
}

impl<P: InputPin, const N: usize> DigitalReader for PinBank<P, N> {
    fn read_digital(&mut self, source: Source) -> bool {
        let Some(pin) = usize::try_from(source)
            .ok()
            .and_then(|i| self.pins.get_mut(i))
        else {
            warn!("pin_bank: no pin for source {}", source);
            return self.released_level;
        };
        match pin.is_high() {
            Ok(high) => high,
            Err(e) => {
                warn!("pin_bank: source {} read failed: {:?}", source, e.kind());
                self.released_level
            }
        }
    }
}

/// Analog reader for boards without multiplexed keys.
///
/// Only consulted if an analog channel is configured anyway; reports `0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnalog;

impl AnalogReader for NoAnalog {
    fn read_analog(&mut self, _source: Source) -> u16 {
        0
    }
}

/// Joins separate analog and digital readers into one detector input.
#[derive(Debug, Default)]
pub struct InputPair<A, D> {
    pub analog: A,
    pub digital: D,
}

impl<A, D> InputPair<A, D> {
    pub fn new(analog: A, digital: D) -> Self {
        Self { analog, digital }
    }
}

impl<A: AnalogReader, D> AnalogReader for InputPair<A, D> {
    fn read_analog(&mut self, source: Source) -> u16 {
        self.analog.read_analog(source)
    }
}

impl<A, D: DigitalReader> DigitalReader for InputPair<A, D> {
    fn read_digital(&mut self, source: Source) -> bool {
        self.digital.read_digital(source)
    }
}
