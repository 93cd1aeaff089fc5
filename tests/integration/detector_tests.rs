//! Scan and edge-detection behaviour of `KeyDetector::detect`.
//!
//! Pull-down wiring unless stated otherwise: HIGH = pressed.

use keydetector::{Channel, DetectorConfig, KeyDetector, KeyEvent};

use super::mock_hw::{CollectSink, HwCall, MockDelay, MockHardware, key};

const PIN_A: i32 = 10;
const PIN_B: i32 = 11;
const PIN_C: i32 = 12;
const LADDER: i32 = 4;

fn detector(config: DetectorConfig) -> KeyDetector<MockHardware, MockDelay> {
    let hw = MockHardware::new();
    let delay = hw.delay();
    KeyDetector::new(config, hw, delay).unwrap()
}

/// Three digital buttons: 1 on A, 2 on B, 3 on C.
fn three_buttons() -> KeyDetector<MockHardware, MockDelay> {
    detector(
        DetectorConfig::new()
            .with_channel(Channel::digital(1, PIN_A).unwrap())
            .unwrap()
            .with_channel(Channel::digital(2, PIN_B).unwrap())
            .unwrap()
            .with_channel(Channel::digital(3, PIN_C).unwrap())
            .unwrap(),
    )
}

// ── Idle / single press ───────────────────────────────────────

#[test]
fn idle_table_reports_nothing() {
    let mut d = three_buttons();
    for _ in 0..3 {
        let s = d.detect();
        assert_eq!(s.current, None);
        assert_eq!(s.secondary, None);
        assert_eq!(s.trigger, None);
        assert_eq!(s.trigger_release, None);
    }
}

#[test]
fn empty_table_is_always_idle() {
    let mut d = detector(DetectorConfig::new());
    let s = d.detect();
    assert!(s.is_idle());
    assert!(d.reader_mut().calls().is_empty());
}

#[test]
fn single_press_triggers_once() {
    let mut d = three_buttons();
    d.detect();

    d.reader_mut().set_digital(PIN_B, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.trigger, Some(key(2)));
    assert_eq!(s.secondary, None);
    assert_eq!(s.trigger_release, None);

    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.previous, Some(key(2)));
    assert_eq!(s.trigger, None);
}

#[test]
fn release_reports_trigger_release() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_C, true);
    d.detect();

    d.reader_mut().set_digital(PIN_C, false);
    let s = d.detect();
    assert_eq!(s.current, None);
    assert_eq!(s.trigger_release, Some(key(3)));
    assert_eq!(s.trigger, None);

    let s = d.detect();
    assert_eq!(s.trigger_release, None);
}

#[test]
fn switching_keys_triggers_new_key_without_release() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.detect();

    d.reader_mut().set_digital(PIN_A, false);
    d.reader_mut().set_digital(PIN_C, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(3)));
    assert_eq!(s.trigger, Some(key(3)));
    assert_eq!(s.trigger_release, None);
}

#[test]
fn pullup_wiring_treats_low_as_pressed() {
    let mut d = detector(
        DetectorConfig::new()
            .with_pullup(true)
            .with_channel(Channel::digital(1, PIN_A).unwrap())
            .unwrap(),
    );
    d.reader_mut().set_digital(PIN_A, true);
    assert_eq!(d.detect().current, None);

    d.reader_mut().set_digital(PIN_A, false);
    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.trigger, Some(key(1)));
}

// ── Two keys ──────────────────────────────────────────────────

#[test]
fn second_key_in_scan_order_becomes_secondary() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.detect();

    d.reader_mut().set_digital(PIN_B, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.secondary, Some(key(2)));
    assert_eq!(s.trigger, Some(key(2)));
    assert_eq!(s.trigger_release, None);
}

#[test]
fn held_primary_stays_primary_when_scanned_second() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_B, true);
    d.detect();

    // Key 1 is scanned before key 2 but key 2 was already held.
    d.reader_mut().set_digital(PIN_A, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.secondary, Some(key(1)));
    assert_eq!(s.trigger, Some(key(1)));

    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.secondary, Some(key(1)));
    assert_eq!(s.trigger, None);
}

#[test]
fn simultaneous_press_from_idle_triggers_primary() {
    let mut d = three_buttons();
    d.detect();
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_digital(PIN_C, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.secondary, Some(key(3)));
    assert_eq!(s.trigger, Some(key(1)));
}

#[test]
fn releasing_secondary_reports_secondary() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.detect();
    d.reader_mut().set_digital(PIN_B, true);
    d.detect();

    d.reader_mut().set_digital(PIN_B, false);
    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.secondary, None);
    assert_eq!(s.trigger_release, Some(key(2)));
    assert_eq!(s.trigger, None);

    let s = d.detect();
    assert_eq!(s.trigger_release, None);
    assert_eq!(s.trigger, None);
}

#[test]
fn releasing_primary_reports_primary() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.detect();
    d.reader_mut().set_digital(PIN_B, true);
    d.detect();

    d.reader_mut().set_digital(PIN_A, false);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.trigger_release, Some(key(1)));
    assert_eq!(s.trigger, None);
}

#[test]
fn scan_stops_after_second_active_channel() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_digital(PIN_B, true);
    d.reader_mut().set_digital(PIN_C, true);
    d.reader_mut().clear_log();

    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.secondary, Some(key(2)));
    assert_eq!(
        d.reader_mut().calls(),
        [HwCall::ReadDigital(PIN_A), HwCall::ReadDigital(PIN_B)]
    );
}

#[test]
fn third_key_is_ignored_while_two_are_held() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_digital(PIN_B, true);
    d.detect();

    d.reader_mut().set_digital(PIN_C, true);
    let s = d.detect();
    assert!(!s.is_pressed(key(3)));
    assert_eq!(s.trigger, None);
}

// ── Analog / mixed ────────────────────────────────────────────

/// Digital 1 on A, then ladder keys 2 @ 500 and 3 @ 800.
fn mixed() -> KeyDetector<MockHardware, MockDelay> {
    detector(
        DetectorConfig::new()
            .with_channel(Channel::digital(1, PIN_A).unwrap())
            .unwrap()
            .with_channel(Channel::analog(2, LADDER, 500).unwrap())
            .unwrap()
            .with_channel(Channel::analog(3, LADDER, 800).unwrap())
            .unwrap(),
    )
}

#[test]
fn digital_then_analog_walkthrough() {
    let mut d = mixed();

    // Ladder key 2 alone.
    d.reader_mut().set_analog(LADDER, 500);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.trigger, Some(key(2)));

    // Digital key 1 joins; scanned first, but 2 keeps the primary slot.
    d.reader_mut().set_digital(PIN_A, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.secondary, Some(key(1)));
    assert_eq!(s.trigger, Some(key(1)));

    // Digital key 1 released.
    d.reader_mut().set_digital(PIN_A, false);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.secondary, None);
    assert_eq!(s.trigger_release, Some(key(1)));
    assert_eq!(s.trigger, None);
}

#[test]
fn analog_reading_outside_band_is_inactive() {
    let mut d = mixed();
    d.reader_mut().set_analog(LADDER, 516);
    assert_eq!(d.detect().current, None);
    d.reader_mut().set_analog(LADDER, 515);
    assert_eq!(d.detect().current, Some(key(2)));
}

#[test]
fn two_analog_channels_never_pair() {
    // Separate ladders, both in band.
    let mut d = detector(
        DetectorConfig::new()
            .with_channel(Channel::analog(1, 4, 500).unwrap())
            .unwrap()
            .with_channel(Channel::analog(2, 5, 500).unwrap())
            .unwrap(),
    );
    d.reader_mut().set_analog(4, 500);
    d.reader_mut().set_analog(5, 500);
    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.secondary, None);
}

#[test]
fn digital_after_analog_becomes_secondary() {
    let mut d = detector(
        DetectorConfig::new()
            .with_channel(Channel::analog(1, LADDER, 500).unwrap())
            .unwrap()
            .with_channel(Channel::digital(2, PIN_A).unwrap())
            .unwrap(),
    );
    d.reader_mut().set_analog(LADDER, 500);
    d.detect();
    d.reader_mut().set_digital(PIN_A, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(1)));
    assert_eq!(s.secondary, Some(key(2)));
    assert_eq!(s.trigger, Some(key(2)));
}

#[test]
fn new_primary_under_held_secondary_triggers_primary() {
    // Key 3 (ladder) is held as secondary of digital key 1; then key 1
    // goes away and digital key 2 arrives in the same scan.
    let mut d = detector(
        DetectorConfig::new()
            .with_channel(Channel::digital(1, PIN_A).unwrap())
            .unwrap()
            .with_channel(Channel::digital(2, PIN_B).unwrap())
            .unwrap()
            .with_channel(Channel::analog(3, LADDER, 800).unwrap())
            .unwrap(),
    );
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_analog(LADDER, 800);
    let s = d.detect();
    assert_eq!((s.current, s.secondary), (Some(key(1)), Some(key(3))));

    d.reader_mut().set_digital(PIN_A, false);
    d.reader_mut().set_digital(PIN_B, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(2)));
    assert_eq!(s.secondary, Some(key(3)));
    assert_eq!(s.trigger, Some(key(2)));
    assert_eq!(s.trigger_release, None);
}

// ── Steady state ──────────────────────────────────────────────

#[test]
fn steady_readings_are_quiet_after_first_scan() {
    let mut d = mixed();
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_analog(LADDER, 800);
    d.detect();
    for _ in 0..5 {
        let s = d.detect();
        assert_eq!(s.trigger, None);
        assert_eq!(s.trigger_release, None);
        assert_eq!(s.current, Some(key(1)));
        assert_eq!(s.secondary, Some(key(3)));
    }
}

#[test]
fn duplicate_codes_report_shared_identity() {
    let mut d = detector(
        DetectorConfig::new()
            .with_channel(Channel::digital(6, PIN_A).unwrap())
            .unwrap()
            .with_channel(Channel::analog(6, LADDER, 500).unwrap())
            .unwrap(),
    );
    d.reader_mut().set_analog(LADDER, 500);
    let s = d.detect();
    assert_eq!(s.current, Some(key(6)));
    assert_eq!(s.trigger, Some(key(6)));

    // Same logical key from the other input: no new edge.
    d.reader_mut().set_analog(LADDER, 0);
    d.reader_mut().set_digital(PIN_A, true);
    let s = d.detect();
    assert_eq!(s.current, Some(key(6)));
    assert_eq!(s.trigger, None);
}

#[test]
fn shared_code_held_on_both_inputs_releases_once() {
    let mut d = detector(
        DetectorConfig::new()
            .with_channel(Channel::digital(6, PIN_A).unwrap())
            .unwrap()
            .with_channel(Channel::analog(6, LADDER, 500).unwrap())
            .unwrap(),
    );
    let mut sink = CollectSink::new();

    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_analog(LADDER, 500);
    let s = d.poll(&mut sink);
    assert_eq!((s.current, s.secondary), (Some(key(6)), None));

    // One input lets go; the key is still held through the other.
    d.reader_mut().set_digital(PIN_A, false);
    let s = d.poll(&mut sink);
    assert_eq!(s.current, Some(key(6)));
    assert_eq!(s.trigger_release, None);

    d.reader_mut().set_analog(LADDER, 0);
    d.poll(&mut sink);

    assert_eq!(
        sink.events,
        [KeyEvent::Pressed(key(6)), KeyEvent::Released(key(6))]
    );
}

#[test]
fn shared_code_does_not_block_a_different_second_key() {
    let mut d = detector(
        DetectorConfig::new()
            .with_channel(Channel::digital(6, PIN_A).unwrap())
            .unwrap()
            .with_channel(Channel::digital(6, PIN_B).unwrap())
            .unwrap()
            .with_channel(Channel::digital(7, PIN_C).unwrap())
            .unwrap(),
    );
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_digital(PIN_B, true);
    d.reader_mut().set_digital(PIN_C, true);
    let s = d.detect();
    assert_eq!((s.current, s.secondary), (Some(key(6)), Some(key(7))));
}

// ── Accessors, poll, reset ────────────────────────────────────

#[test]
fn accessors_mirror_state() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.reader_mut().set_digital(PIN_B, true);
    let s = d.detect();
    assert_eq!(d.state(), s);
    assert_eq!(d.current(), Some(key(1)));
    assert_eq!(d.secondary(), Some(key(2)));
    assert_eq!(d.previous(), None);
    assert_eq!(d.previous_secondary(), None);
    assert_eq!(d.trigger(), Some(key(1)));
    assert_eq!(d.trigger_release(), None);
    assert!(d.is_pressed(key(2)));
    assert!(!d.is_pressed(key(3)));
    assert_eq!(d.channels().len(), 3);
}

#[test]
fn poll_emits_edges_in_order() {
    let mut d = three_buttons();
    let mut sink = CollectSink::new();

    d.reader_mut().set_digital(PIN_A, true);
    d.poll(&mut sink);
    d.poll(&mut sink);
    d.reader_mut().set_digital(PIN_A, false);
    d.poll(&mut sink);

    assert_eq!(
        sink.events,
        [KeyEvent::Pressed(key(1)), KeyEvent::Released(key(1))]
    );
}

#[test]
fn reset_returns_to_idle() {
    let mut d = three_buttons();
    d.reader_mut().set_digital(PIN_A, true);
    d.detect();
    d.reset();
    assert!(d.state().is_idle());
    assert_eq!(d.previous(), None);

    // Still held: looks like a fresh press after reset.
    assert_eq!(d.detect().trigger, Some(key(1)));
}

#[test]
fn release_hands_back_collaborators() {
    let mut d = three_buttons();
    d.detect();
    let (hw, _delay) = d.release();
    assert_eq!(hw.calls().len(), 3);
}
