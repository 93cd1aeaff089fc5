//! Channel table entries.
//!
//! A [`Channel`] ties a key code to an input source.  Digital channels are
//! plain switches; analog channels are one level of a switch bank encoded
//! onto a single ADC line (e.g. by a resistor ladder or a small DAC).
//!
//! Key codes are [`NonZeroU8`], so "no key" is `None` rather than a magic
//! zero that a real channel could accidentally reuse.

use core::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Identifier reported for a pressed channel.
pub type KeyCode = NonZeroU8;

/// Opaque pin / ADC identifier handed to the readers.
pub type Source = i32;

/// How a channel is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelMode {
    /// Binary level on a GPIO.
    Digital,
    /// Target ADC level of a multiplexed key.
    Analog { level: u16 },
}

/// One configured input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub code: KeyCode,
    pub source: Source,
    pub mode: ChannelMode,
}

impl Channel {
    /// Digital switch on `source`.
    pub fn digital(code: u8, source: Source) -> Result<Self> {
        Ok(Self {
            code: KeyCode::new(code).ok_or(ConfigError::ReservedCode)?,
            source,
            mode: ChannelMode::Digital,
        })
    }

    /// Analog-multiplexed key that reads `level` on `source` when pressed.
    pub fn analog(code: u8, source: Source, level: u16) -> Result<Self> {
        Ok(Self {
            code: KeyCode::new(code).ok_or(ConfigError::ReservedCode)?,
            source,
            mode: ChannelMode::Analog { level },
        })
    }

    pub fn is_analog(&self) -> bool {
        matches!(self.mode, ChannelMode::Analog { .. })
    }

    /// Inclusive range of readings accepted as a press, or `None` for
    /// digital channels.
    pub fn band(&self, threshold: u16) -> Option<(i32, i32)> {
        match self.mode {
            ChannelMode::Digital => None,
            ChannelMode::Analog { level } => Some(band(level, threshold)),
        }
    }
}

/// Inclusive bounds of the open interval `(level - threshold, level + threshold)`.
pub(crate) fn band(level: u16, threshold: u16) -> (i32, i32) {
    let level = i32::from(level);
    let threshold = i32::from(threshold);
    (level - threshold + 1, level + threshold - 1)
}

/// True when `reading` lies strictly within `threshold` of `level`.
pub(crate) fn in_band(reading: u16, level: u16, threshold: u16) -> bool {
    let (lo, hi) = band(level, threshold);
    (lo..=hi).contains(&i32::from(reading))
}
