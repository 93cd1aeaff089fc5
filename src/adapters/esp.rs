//! ESP32 input adapter.
//!
//! Configures every channel in the table with raw ESP-IDF sys calls:
//! digital sources become GPIO inputs with the pull resistor matching the
//! wiring, analog sources are mapped onto ADC1 oneshot channels.  Reads
//! are plain register accesses from the single polling context.

use core::fmt;

use esp_idf_svc::sys::*;
use heapless::LinearMap;
use log::{info, warn};

use crate::channel::{ChannelMode, Source};
use crate::adapters::{gpio_bit, register};
use crate::config::{DetectorConfig, MAX_CHANNELS};
use crate::ports::{AnalogReader, DigitalReader};

/// Errors while configuring the input peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EspInitError {
    AdcInitFailed(i32),
    /// The source GPIO is not routed to ADC1.
    NotAdc1(Source),
    GpioConfigFailed(i32),
    /// The source is not a usable GPIO number.
    InvalidGpio(Source),
    /// More distinct ADC sources than the channel table can hold.
    AdcTableFull(Source),
}

impl fmt::Display for EspInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::NotAdc1(gpio) => write!(f, "GPIO {} is not an ADC1 pin", gpio),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::InvalidGpio(gpio) => write!(f, "GPIO {} is out of range", gpio),
            Self::AdcTableFull(gpio) => write!(f, "no room to track ADC GPIO {}", gpio),
        }
    }
}

impl core::error::Error for EspInitError {}

/// ADC1 + GPIO readers for the configured channel table.
pub struct EspInputs {
    adc1: adc_oneshot_unit_handle_t,
    adc_channels: LinearMap<Source, adc_channel_t, MAX_CHANNELS>,
}

impl EspInputs {
    /// Configure the peripherals used by `config`.  Call once at boot.
    pub fn new(config: &DetectorConfig) -> Result<Self, EspInitError> {
        let mut inputs = Self {
            adc1: core::ptr::null_mut(),
            adc_channels: LinearMap::new(),
        };

        for channel in &config.channels {
            match channel.mode {
                ChannelMode::Digital => Self::init_gpio(channel.source, config.pullup)?,
                ChannelMode::Analog { .. } => inputs.init_adc_channel(channel.source)?,
            }
        }

        info!(
            "esp_inputs: {} ADC channel(s) configured",
            inputs.adc_channels.len()
        );
        Ok(inputs)
    }

    fn init_gpio(gpio: Source, pullup: bool) -> Result<(), EspInitError> {
        let pin_bit_mask = gpio_bit(gpio).ok_or(EspInitError::InvalidGpio(gpio))?;
        let cfg = gpio_config_t {
            pin_bit_mask,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: if pullup {
                gpio_pullup_t_GPIO_PULLUP_ENABLE
            } else {
                gpio_pullup_t_GPIO_PULLUP_DISABLE
            },
            pull_down_en: if pullup {
                gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
            } else {
                gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
            },
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: called from the single-threaded boot path.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(EspInitError::GpioConfigFailed(ret));
        }
        Ok(())
    }

    fn init_adc_channel(&mut self, gpio: Source) -> Result<(), EspInitError> {
        if self.adc_channels.contains_key(&gpio) {
            return Ok(());
        }

        if self.adc1.is_null() {
            let init_cfg = adc_oneshot_unit_init_cfg_t {
                unit_id: adc_unit_t_ADC_UNIT_1,
                ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..Default::default()
            };
            // SAFETY: the handle is written once here, before any read.
            let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut self.adc1) };
            if ret != ESP_OK as i32 {
                return Err(EspInitError::AdcInitFailed(ret));
            }
        }

        let mut unit: adc_unit_t = 0;
        let mut chan: adc_channel_t = 0;
        // SAFETY: pure lookup into the SoC's IO mux table.
        let ret = unsafe { adc_oneshot_io_to_channel(gpio, &mut unit, &mut chan) };
        if ret != ESP_OK as i32 || unit != adc_unit_t_ADC_UNIT_1 {
            return Err(EspInitError::NotAdc1(gpio));
        }

        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        // SAFETY: adc1 is a valid handle created above.
        let ret = unsafe { adc_oneshot_config_channel(self.adc1, chan, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(EspInitError::AdcInitFailed(ret));
        }

        if !register(&mut self.adc_channels, gpio, chan) {
            warn!("esp_inputs: ADC channel map full at GPIO {}", gpio);
            return Err(EspInitError::AdcTableFull(gpio));
        }
        Ok(())
    }
}

impl AnalogReader for EspInputs {
    fn read_analog(&mut self, source: Source) -> u16 {
        let Some(&chan) = self.adc_channels.get(&source) else {
            warn!("esp_inputs: GPIO {} has no ADC channel", source);
            return 0;
        };
        let mut raw: i32 = 0;
        // SAFETY: handle and channel were configured in new(); main-loop only.
        let ret = unsafe { adc_oneshot_read(self.adc1, chan, &mut raw) };
        if ret != ESP_OK as i32 {
            return 0;
        }
        raw.max(0) as u16
    }
}

impl DigitalReader for EspInputs {
    fn read_digital(&mut self, source: Source) -> bool {
        // SAFETY: read-only register access on a configured input pin.
        (unsafe { gpio_get_level(source) }) != 0
    }
}

impl Drop for EspInputs {
    fn drop(&mut self) {
        if !self.adc1.is_null() {
            // SAFETY: handle came from adc_oneshot_new_unit and is not used after this.
            unsafe { adc_oneshot_del_unit(self.adc1) };
        }
    }
}
