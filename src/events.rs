//! Edge events derived from consecutive scans.

use core::fmt;

use crate::channel::KeyCode;

/// A press or release edge reported by one `detect()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// The key became active this scan.
    Pressed(KeyCode),
    /// The key stopped being active this scan.
    Released(KeyCode),
}

impl KeyEvent {
    pub fn code(&self) -> KeyCode {
        match *self {
            Self::Pressed(code) | Self::Released(code) => code,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressed(code) => write!(f, "pressed={code}"),
            Self::Released(code) => write!(f, "released={code}"),
        }
    }
}
