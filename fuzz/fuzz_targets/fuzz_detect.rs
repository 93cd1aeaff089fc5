//! Fuzz target: `KeyDetector::detect`
//!
//! The first bytes describe a channel table, the rest are consumed as a
//! stream of readings.  Asserts the detector never panics and never
//! reports a press and a release in the same scan.
//!
//! cargo fuzz run fuzz_detect

#![no_main]

use keydetector::adapters::sim::{SimDelay, SimInputs};
use keydetector::{Channel, DetectorConfig, KeyDetector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&header, rest)) = data.split_first() else {
        return;
    };
    let pullup = header & 0x80 != 0;
    let len = usize::from(header & 0x07) + 1;
    if rest.len() < len {
        return;
    }
    let (table, readings) = rest.split_at(len);

    // Digital channels on sources 0..8, analog ones on source 100 with
    // levels spaced so their bands never overlap.
    let mut config = DetectorConfig::new().with_pullup(pullup);
    for (i, &b) in table.iter().enumerate() {
        let code = (b & 0x3f).max(1);
        let channel = if b & 0x40 != 0 {
            Channel::analog(code, 100, (i as u16 + 1) * 64)
        } else {
            Channel::digital(code, i as i32)
        };
        let Ok(channel) = channel else { return };
        if config.push(channel).is_err() {
            return;
        }
    }
    let Ok(mut detector) = KeyDetector::new(config, SimInputs::new(pullup), SimDelay::default())
    else {
        return;
    };

    for chunk in readings.chunks(2) {
        let bits = chunk[0];
        let ladder = u16::from(*chunk.get(1).unwrap_or(&0)) * 4;
        let sim = detector.reader_mut();
        for i in 0..8 {
            sim.set_digital(i, bits & (1 << i) != 0);
        }
        sim.set_analog(100, ladder);

        let s = detector.detect();
        assert!(s.trigger.is_none() || s.trigger_release.is_none());
        assert!(s.secondary.is_none() || s.current.is_some());
    }
});
