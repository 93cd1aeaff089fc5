//! KeyDetector library.
//!
//! Polled detection of digital and analog-multiplexed keys for tight
//! control loops.  The pure-logic modules build and test on the host;
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within [`adapters`].
//!
//! ```text
//!  AnalogReader ─┐                 ┌──▶ DetectorState (current, trigger, …)
//!                ├──▶ KeyDetector ─┤
//! DigitalReader ─┘     (DelayNs)   └──▶ EventSink (KeyEvent)
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod channel;
pub mod config;
pub mod detector;
pub mod error;
pub mod events;
pub mod pins;
pub mod ports;

pub use channel::{Channel, ChannelMode, KeyCode, Source};
pub use config::{DetectorConfig, MAX_CHANNELS};
pub use detector::{DetectorState, KeyDetector};
pub use error::{ConfigError, Result};
pub use events::KeyEvent;
pub use ports::{AnalogReader, DigitalReader, EventSink};
