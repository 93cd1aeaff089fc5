//! KeyDetector firmware: reference keypad polling loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  EspInputs (ADC1 + GPIO)    FreeRtos delay   │
//! │        │                         │           │
//! │        └──────▶ KeyDetector ◀────┘           │
//! │                     │                        │
//! │                     ▼                        │
//! │               LogEventSink                   │
//! └──────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use log::info;

use keydetector::KeyDetector;
use keydetector::adapters::esp::EspInputs;
use keydetector::adapters::log_sink::LogEventSink;
use keydetector::pins;

/// Main loop period.  The debounce wait, when taken, adds to this.
const POLL_INTERVAL_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("KeyDetector v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Keymap + peripherals ───────────────────────────────
    let config = pins::keymap()?;
    let inputs = EspInputs::new(&config)?;
    let mut detector = KeyDetector::new(config, inputs, FreeRtos)?;
    let mut sink = LogEventSink::new();

    // ── 3. Poll forever ───────────────────────────────────────
    info!("entering poll loop ({} ms)", POLL_INTERVAL_MS);
    loop {
        let state = detector.poll(&mut sink);
        if let (Some(primary), Some(secondary), Some(_)) =
            (state.current, state.secondary, state.trigger)
        {
            info!("KEY | chord {}+{}", primary, secondary);
        }
        FreeRtos::delay_ms(POLL_INTERVAL_MS);
    }
}
