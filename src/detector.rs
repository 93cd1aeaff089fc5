//! Key detection engine.
//!
//! [`KeyDetector`] is polled once per control-loop iteration.  Each call to
//! [`detect`](KeyDetector::detect) scans the channel table top to bottom,
//! resolves at most two active channels into a primary / secondary pair,
//! and derives press / release edges from the previous scan.
//!
//! ## Scan rules
//!
//! | Channel | Becomes `first` | Becomes `second`               |
//! |---------|-----------------|--------------------------------|
//! | Digital | if none yet     | if `first` already found       |
//! | Analog  | if none yet     | only if `first` is digital     |
//!
//! Two in-band analog channels never pair up: close or overlapping bands
//! would otherwise flip between primary and secondary from scan to scan.
//! Scanning stops as soon as a second channel is found.
//!
//! ## Regimes
//!
//! ```text
//!   idle ◀──────▶ single ◀──────▶ dual
//!     ▲                            │
//!     └────────────────────────────┘
//! ```
//!
//! `trigger` and `trigger_release` are never both set in one scan.

use embedded_hal::delay::DelayNs;
use log::{debug, info, trace};

use crate::channel::{Channel, ChannelMode, KeyCode, Source, in_band};
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::events::KeyEvent;
use crate::ports::{AnalogReader, DigitalReader, EventSink};

/// Snapshot of the detector after a scan.  All fields start as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorState {
    /// Primary active key this scan.
    pub current: Option<KeyCode>,
    /// `current` from the previous scan.
    pub previous: Option<KeyCode>,
    /// Secondary active key, only set when two keys are active.
    pub secondary: Option<KeyCode>,
    /// `secondary` from the previous scan.
    pub previous_secondary: Option<KeyCode>,
    /// Key whose press edge was detected this scan.
    pub trigger: Option<KeyCode>,
    /// Key whose release edge was detected this scan.
    pub trigger_release: Option<KeyCode>,
}

impl DetectorState {
    /// Edge events of this scan, release first.
    pub fn events(&self) -> impl Iterator<Item = KeyEvent> + use<> {
        self.trigger_release
            .map(KeyEvent::Released)
            .into_iter()
            .chain(self.trigger.map(KeyEvent::Pressed))
    }

    /// True when `code` is the primary or secondary active key.
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.current == Some(code) || self.secondary == Some(code)
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Shift `current`/`secondary` into the history slots.
    fn shift(&mut self) {
        self.previous = self.current;
        self.previous_secondary = self.secondary;
    }

    fn resolve_idle(&mut self) {
        self.current = None;
        self.secondary = None;
        self.trigger_release = self.previous;
        self.trigger = None;
    }

    fn resolve_dual(&mut self, first: KeyCode, second: KeyCode) {
        // Keep last scan's primary in the primary slot.
        if Some(second) == self.previous {
            self.current = Some(second);
            self.secondary = Some(first);
        } else {
            self.current = Some(first);
            self.secondary = Some(second);
        }

        self.trigger = if self.current != self.previous {
            // Primary changed under a held secondary, e.g. a digital key
            // pressed ahead of an analog key that was already held.
            self.current
        } else if self.secondary != self.previous_secondary {
            self.secondary
        } else {
            None
        };
        self.trigger_release = None;
    }

    fn resolve_single(&mut self, first: KeyCode) {
        self.current = Some(first);
        self.secondary = None;

        if self.previous_secondary.is_some() {
            // One of the two held keys went away; it may have been the one
            // recorded as primary.
            self.trigger_release = if self.previous_secondary == self.current {
                self.previous
            } else {
                self.previous_secondary
            };
            self.trigger = None;
        } else {
            self.trigger_release = None;
            self.trigger = if self.current == self.previous {
                None
            } else {
                self.current
            };
        }
    }
}

/// Active channels found by one pass over the table.
#[derive(Debug, Clone, Copy, Default)]
struct Scan {
    first: Option<(KeyCode, ChannelMode)>,
    second: Option<KeyCode>,
}

impl Scan {
    /// Record an active channel.  Returns `true` once the pair is complete.
    ///
    /// A channel sharing `first`'s code is the same logical key and never
    /// fills the second slot.
    fn record(&mut self, channel: &Channel) -> bool {
        match self.first {
            None => self.first = Some((channel.code, channel.mode)),
            Some((code, _)) if code == channel.code => {}
            Some((_, ChannelMode::Digital)) => self.second = Some(channel.code),
            Some((_, ChannelMode::Analog { .. })) if channel.is_analog() => {}
            Some(_) => self.second = Some(channel.code),
        }
        self.second.is_some()
    }
}

/// Polled key detector over a fixed channel table.
pub struct KeyDetector<R, D> {
    config: DetectorConfig,
    reader: R,
    delay: D,
    state: DetectorState,
}

impl<R, D> KeyDetector<R, D>
where
    R: AnalogReader + DigitalReader,
    D: DelayNs,
{
    /// Validate `config` and build an idle detector.
    pub fn new(config: DetectorConfig, reader: R, delay: D) -> Result<Self> {
        config.validate()?;
        info!(
            "KeyDetector: {} channel(s), debounce={}ms, threshold={}, pullup={}",
            config.channels.len(),
            config.debounce_delay_ms,
            config.analog_threshold,
            config.pullup,
        );
        Ok(Self {
            config,
            reader,
            delay,
            state: DetectorState::default(),
        })
    }

    /// Run one scan and return the resulting state.
    pub fn detect(&mut self) -> DetectorState {
        self.state.shift();

        let scan = self.scan();
        match scan {
            Scan { first: None, .. } => self.state.resolve_idle(),
            Scan {
                first: Some((first, _)),
                second: Some(second),
            } => self.state.resolve_dual(first, second),
            Scan {
                first: Some((first, _)),
                second: None,
            } => self.state.resolve_single(first),
        }

        if let Some(code) = self.state.trigger_release {
            debug!("key {} released", code);
        }
        if let Some(code) = self.state.trigger {
            debug!("key {} pressed", code);
        }
        self.state
    }

    /// Run one scan and forward its edges to `sink`.
    pub fn poll(&mut self, sink: &mut impl EventSink) -> DetectorState {
        let state = self.detect();
        for event in state.events() {
            sink.emit(&event);
        }
        state
    }

    /// Forget all history and return to idle.
    pub fn reset(&mut self) {
        self.state = DetectorState::default();
    }

    fn scan(&mut self) -> Scan {
        let mut scan = Scan::default();
        for i in 0..self.config.channels.len() {
            let channel = self.config.channels[i];
            let active = match channel.mode {
                ChannelMode::Analog { level } => self.analog_active(channel.source, level),
                ChannelMode::Digital => self.digital_active(channel.source),
            };
            if active && scan.record(&channel) {
                break;
            }
        }
        trace!("scan: first={:?} second={:?}", scan.first, scan.second);
        scan
    }

    fn analog_active(&mut self, source: Source, level: u16) -> bool {
        let threshold = self.config.analog_threshold;
        let mut reading = self.reader.read_analog(source);
        if self.config.debounce_delay_ms > 0 && in_band(reading, level, threshold) {
            self.delay.delay_ms(self.config.debounce_delay_ms);
            reading = self.reader.read_analog(source);
        }
        in_band(reading, level, threshold)
    }

    fn digital_active(&mut self, source: Source) -> bool {
        let pressed = self.config.pressed_level();
        let mut reading = self.reader.read_digital(source);
        if self.config.debounce_delay_ms > 0 && reading == pressed {
            self.delay.delay_ms(self.config.debounce_delay_ms);
            reading = self.reader.read_digital(source);
        }
        reading == pressed
    }
}

impl<R, D> KeyDetector<R, D> {
    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn current(&self) -> Option<KeyCode> {
        self.state.current
    }

    pub fn previous(&self) -> Option<KeyCode> {
        self.state.previous
    }

    pub fn secondary(&self) -> Option<KeyCode> {
        self.state.secondary
    }

    pub fn previous_secondary(&self) -> Option<KeyCode> {
        self.state.previous_secondary
    }

    pub fn trigger(&self) -> Option<KeyCode> {
        self.state.trigger
    }

    pub fn trigger_release(&self) -> Option<KeyCode> {
        self.state.trigger_release
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.state.is_pressed(code)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.config.channels
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Tear down the detector and hand back its collaborators.
    pub fn release(self) -> (R, D) {
        (self.reader, self.delay)
    }
}
