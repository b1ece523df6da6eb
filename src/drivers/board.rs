// Forest Sentinels — ESP32 AudioKit Board Driver
//
// Raw ESP-IDF GPIO / ADC calls behind the `PinIo` + `Clock` seam. Keys are
// reconfigured at runtime (shared SD/SPI pins), which the typed `PinDriver`
// API cannot express, so this goes straight to the C driver.

use esp_idf_hal::delay::FreeRtos;
use esp_idf_sys as sys;

use forest_sentinels::config::PIN_KEY1;
use forest_sentinels::hal::{Clock, PinId, PinIo, PinMode};

const ADC_WIDTH_BIT_12: u32 = 3;
const ADC_ATTEN_DB_11: u32 = 3;
const ADC_MAX: i32 = 4095;

/// ADC1 channel wired to an analog-capable GPIO (ESP32 classic).
fn adc1_channel(pin: PinId) -> Option<sys::adc_channel_t> {
    match pin {
        36 => Some(sys::adc_channel_t_ADC_CHANNEL_0),
        37 => Some(sys::adc_channel_t_ADC_CHANNEL_1),
        38 => Some(sys::adc_channel_t_ADC_CHANNEL_2),
        39 => Some(sys::adc_channel_t_ADC_CHANNEL_3),
        32 => Some(sys::adc_channel_t_ADC_CHANNEL_4),
        33 => Some(sys::adc_channel_t_ADC_CHANNEL_5),
        34 => Some(sys::adc_channel_t_ADC_CHANNEL_6),
        35 => Some(sys::adc_channel_t_ADC_CHANNEL_7),
        _ => None,
    }
}

pub struct EspBoard;

impl EspBoard {
    /// Set up ADC1 for the analog key (12-bit, 11 dB → 0–3.3 V).
    pub fn new() -> anyhow::Result<Self> {
        let channel = adc1_channel(PIN_KEY1)
            .ok_or_else(|| anyhow::anyhow!("GPIO{} has no ADC1 channel", PIN_KEY1))?;

        unsafe {
            sys::esp!(sys::adc1_config_width(ADC_WIDTH_BIT_12))?;
            sys::esp!(sys::adc1_config_channel_atten(channel, ADC_ATTEN_DB_11))?;
        }

        log::info!("ADC1 ready for KEY1 (GPIO{})", PIN_KEY1);
        Ok(Self)
    }
}

impl PinIo for EspBoard {
    fn set_mode(&mut self, pin: PinId, mode: PinMode) {
        let (direction, pull) = match mode {
            PinMode::Input => (sys::gpio_mode_t_GPIO_MODE_INPUT, sys::gpio_pull_mode_t_GPIO_FLOATING),
            PinMode::InputPullUp => (
                sys::gpio_mode_t_GPIO_MODE_INPUT,
                sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY,
            ),
            PinMode::Output => (sys::gpio_mode_t_GPIO_MODE_OUTPUT, sys::gpio_pull_mode_t_GPIO_FLOATING),
        };

        if let Err(e) = sys::esp!(unsafe { sys::gpio_set_direction(pin, direction) }) {
            log::error!("GPIO{} direction change to {:?} failed: {}", pin, mode, e);
        }
        if let Err(e) = sys::esp!(unsafe { sys::gpio_set_pull_mode(pin, pull) }) {
            log::error!("GPIO{} pull change to {:?} failed: {}", pin, mode, e);
        }
    }

    fn read_digital(&mut self, pin: PinId) -> bool {
        unsafe { sys::gpio_get_level(pin) != 0 }
    }

    fn read_analog(&mut self, pin: PinId) -> u16 {
        let Some(channel) = adc1_channel(pin) else {
            log::warn!("GPIO{} is not an ADC1 pin — reading as idle", pin);
            return ADC_MAX as u16;
        };

        let raw = unsafe { sys::adc1_get_raw(channel) };
        if raw < 0 {
            log::warn!("ADC1 read on GPIO{} failed ({})", pin, raw);
            return ADC_MAX as u16;
        }
        raw.min(ADC_MAX) as u16
    }

    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}

impl Clock for EspBoard {
    // Wraps at ~49 days — state machine uses wrapping arithmetic.
    fn now_ms(&self) -> u32 {
        unsafe { (sys::esp_timer_get_time() / 1000) as u32 }
    }
}
