//! Host-side simulated inputs.
//!
//! Stands in for the ADC and GPIO readers when running on a workstation:
//! levels are set explicitly and read back by the detector.  Sources that
//! were never set read as `0` (analog) or the released level (digital).

use embedded_hal::delay::DelayNs;
use heapless::LinearMap;
use log::warn;

use crate::channel::Source;
use crate::config::MAX_CHANNELS;
use crate::ports::{AnalogReader, DigitalReader};

/// In-memory analog and digital levels keyed by source.
#[derive(Debug, Default)]
pub struct SimInputs {
    analog: LinearMap<Source, u16, MAX_CHANNELS>,
    digital: LinearMap<Source, bool, MAX_CHANNELS>,
    released_level: bool,
    reads: u32,
}

impl SimInputs {
    /// `pullup` selects the level unset digital sources report.
    pub fn new(pullup: bool) -> Self {
        Self {
            released_level: pullup,
            ..Self::default()
        }
    }

    pub fn set_analog(&mut self, source: Source, level: u16) {
        if self.analog.insert(source, level).is_err() {
            warn!("sim: analog map full, dropping source {}", source);
        }
    }

    pub fn set_digital(&mut self, source: Source, high: bool) {
        if self.digital.insert(source, high).is_err() {
            warn!("sim: digital map full, dropping source {}", source);
        }
    }

    /// Return every source to its idle reading.
    pub fn clear(&mut self) {
        self.analog.clear();
        self.digital.clear();
    }

    /// Total reads served so far, analog and digital.
    pub fn reads(&self) -> u32 {
        self.reads
    }
}

impl AnalogReader for SimInputs {
    fn read_analog(&mut self, source: Source) -> u16 {
        self.reads += 1;
        self.analog.get(&source).copied().unwrap_or(0)
    }
}

impl DigitalReader for SimInputs {
    fn read_digital(&mut self, source: Source) -> bool {
        self.reads += 1;
        self.digital
            .get(&source)
            .copied()
            .unwrap_or(self.released_level)
    }
}

/// Delay that returns immediately and keeps a tally instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimDelay {
    pub calls: u32,
    pub total_ns: u64,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}
