//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter     | Implements                    | Connects to                 |
//! |-------------|-------------------------------|-----------------------------|
//! | `pin_bank`  | DigitalReader                 | embedded-hal `InputPin`s    |
//! | `sim`       | AnalogReader, DigitalReader   | In-memory levels (host)     |
//! |             | DelayNs                       | Recorded, no real wait      |
//! | `log_sink`  | EventSink                     | Serial log output           |
//! | `esp`       | AnalogReader, DigitalReader   | ESP32 ADC1 oneshot, GPIO    |

#[cfg(any(test, target_os = "espidf"))]
use heapless::LinearMap;

#[cfg(any(test, target_os = "espidf"))]
use crate::channel::Source;

pub mod log_sink;
pub mod pin_bank;

#[cfg(not(target_os = "espidf"))]
pub mod sim;

#[cfg(target_os = "espidf")]
pub mod esp;

/// Bit selecting `gpio` in a 64-bit pin mask, or `None` when the number
/// is negative or past the mask.
#[cfg(any(test, target_os = "espidf"))]
pub(crate) fn gpio_bit(gpio: Source) -> Option<u64> {
    u32::try_from(gpio).ok().and_then(|n| 1u64.checked_shl(n))
}

/// Insert `value` for `source` unless already present.  Returns `false`
/// when the map is full.
#[cfg(any(test, target_os = "espidf"))]
pub(crate) fn register<V, const N: usize>(
    map: &mut LinearMap<Source, V, N>,
    source: Source,
    value: V,
) -> bool {
    map.contains_key(&source) || map.insert(source, value).is_ok()
}
