//! Pin assignments and keymap for the reference keypad board.
//!
//! Single source of truth for the binary: change a pin here and the
//! detector table follows.
//!
//! The board carries two discrete push buttons (pull-up, active LOW) and
//! a four-key resistor ladder on one ADC1 input.

use crate::channel::Channel;
use crate::config::DetectorConfig;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Key codes
// ---------------------------------------------------------------------------

pub const KEY_UP: u8 = 1;
pub const KEY_RIGHT: u8 = 2;
pub const KEY_DOWN: u8 = 3;
pub const KEY_LEFT: u8 = 4;
pub const KEY_CANCEL: u8 = 5;
pub const KEY_OK: u8 = 6;

// ---------------------------------------------------------------------------
// Discrete buttons
// ---------------------------------------------------------------------------

/// OK button, GPIO with internal pull-up.
pub const OK_BUTTON_GPIO: i32 = 11;
/// Cancel button, GPIO with internal pull-up.
pub const CANCEL_BUTTON_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Resistor ladder (ADC1, 12-bit, 12 dB attenuation)
// ---------------------------------------------------------------------------

/// Ladder output.  ADC1 channel 3 on ESP32-S3.
pub const LADDER_ADC_GPIO: i32 = 4;

/// Raw counts for each ladder key, measured on the reference board.
pub const LADDER_LEVEL_UP: u16 = 400;
pub const LADDER_LEVEL_RIGHT: u16 = 1300;
pub const LADDER_LEVEL_DOWN: u16 = 2200;
pub const LADDER_LEVEL_LEFT: u16 = 3100;

/// Half-width of each ladder band.  The 12-bit ADC drifts further than the
/// 10-bit default assumes.
pub const LADDER_THRESHOLD: u16 = 120;

/// Settle time before the confirming re-read.
pub const DEBOUNCE_MS: u32 = 20;

/// Detector table for the reference board.  Discrete buttons come first so
/// they can pair with a held ladder key.
pub fn keymap() -> Result<DetectorConfig> {
    DetectorConfig::new()
        .with_pullup(true)
        .with_debounce_ms(DEBOUNCE_MS)
        .with_analog_threshold(LADDER_THRESHOLD)
        .with_channel(Channel::digital(KEY_OK, OK_BUTTON_GPIO)?)?
        .with_channel(Channel::digital(KEY_CANCEL, CANCEL_BUTTON_GPIO)?)?
        .with_channel(Channel::analog(KEY_UP, LADDER_ADC_GPIO, LADDER_LEVEL_UP)?)?
        .with_channel(Channel::analog(KEY_RIGHT, LADDER_ADC_GPIO, LADDER_LEVEL_RIGHT)?)?
        .with_channel(Channel::analog(KEY_DOWN, LADDER_ADC_GPIO, LADDER_LEVEL_DOWN)?)?
        .with_channel(Channel::analog(KEY_LEFT, LADDER_ADC_GPIO, LADDER_LEVEL_LEFT)?)
}
