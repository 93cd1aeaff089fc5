//! Detector configuration.
//!
//! The channel table plus the three tuning knobs.  Supplied once when the
//! detector is built and never mutated afterwards.  Serialisable so a
//! keymap can be stored as a postcard blob in flash and reloaded at boot.

use heapless::Vec;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::error::{ConfigError, Result};

/// Maximum number of channels in one table.  A 5-bit DAC feeding a 10-bit
/// ADC with the default threshold leaves room for 32 distinct levels.
pub const MAX_CHANNELS: usize = 32;

/// Default half-width of an analog acceptance band.
pub const DEFAULT_ANALOG_THRESHOLD: u16 = 16;

/// Channel table and scan tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Scan order; earlier channels win primary slot ties.
    pub channels: Vec<Channel, MAX_CHANNELS>,
    /// Wait before the confirming re-read (ms).  `0` disables debounce.
    pub debounce_delay_ms: u32,
    /// Half-width of the analog acceptance band.
    pub analog_threshold: u16,
    /// Pull-up wiring: a LOW reading means pressed.
    pub pullup: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            debounce_delay_ms: 0,
            analog_threshold: DEFAULT_ANALOG_THRESHOLD,
            pullup: false,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel to the end of the scan order.
    pub fn push(&mut self, channel: Channel) -> Result<()> {
        self.channels.push(channel).map_err(|_| ConfigError::TableFull)
    }

    pub fn with_channel(mut self, channel: Channel) -> Result<Self> {
        self.push(channel)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_analog_threshold(mut self, threshold: u16) -> Self {
        self.analog_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_pullup(mut self, pullup: bool) -> Self {
        self.pullup = pullup;
        self
    }

    /// The binary level that counts as "pressed" for digital channels.
    pub fn pressed_level(&self) -> bool {
        !self.pullup
    }

    /// Reject configurations that would make detection ambiguous.
    ///
    /// Duplicate codes are allowed (two inputs may map to one logical key)
    /// but are logged.
    pub fn validate(&self) -> Result<()> {
        if self.analog_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        for (i, a) in self.channels.iter().enumerate() {
            for b in &self.channels[i + 1..] {
                if a.code == b.code {
                    warn!(
                        "config: key {} is assigned to sources {} and {}",
                        a.code, a.source, b.source
                    );
                }
                if a.source != b.source {
                    continue;
                }
                match (a.band(self.analog_threshold), b.band(self.analog_threshold)) {
                    (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => {
                        if a_lo <= b_hi && b_lo <= a_hi {
                            return Err(ConfigError::OverlappingBands {
                                first: a.code,
                                second: b.code,
                            });
                        }
                    }
                    (None, None) => {}
                    _ => warn!(
                        "config: source {} is read both as digital and analog",
                        a.source
                    ),
                }
            }
        }
        Ok(())
    }

    /// Encode into `buf` as a postcard blob; returns the used prefix.
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8]> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Decode and validate a postcard blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
