//! Error types for key detector configuration.
//!
//! Scanning itself never fails: readers always return a value and a noisy
//! pin is indistinguishable from a real press.  The only errors the crate
//! reports are configuration problems, caught once at construction time so
//! the polling loop never has to handle them.

use core::fmt;

use crate::channel::KeyCode;

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Code `0` is reserved for "no key" and cannot name a channel.
    ReservedCode,
    /// The analog acceptance band has zero width.
    ZeroThreshold,
    /// The channel table is already at capacity.
    TableFull,
    /// Two analog channels on the same source accept a common reading.
    OverlappingBands { first: KeyCode, second: KeyCode },
    /// A stored configuration blob failed to decode.
    Corrupted,
    /// The output buffer is too small for the encoded configuration.
    Encode,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedCode => write!(f, "key code 0 is reserved for \"none\""),
            Self::ZeroThreshold => write!(f, "analog threshold must be positive"),
            Self::TableFull => write!(f, "channel table is full"),
            Self::OverlappingBands { first, second } => {
                write!(f, "analog bands of keys {first} and {second} overlap")
            }
            Self::Corrupted => write!(f, "config blob corrupted"),
            Self::Encode => write!(f, "config blob does not fit the buffer"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, ConfigError>;
