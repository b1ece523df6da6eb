// Forest Sentinels — Hardware & System Configuration
// Target: ESP32 AudioKit v2.2 (Xtensa)

use crate::events::ChannelSource;
use crate::hal::{BusPin, PinId, PinMode};

// ---------------------------------------------------------------------------
// Button GPIO Definitions (AudioKit KEY1..KEY6)
// ---------------------------------------------------------------------------
pub const PIN_KEY1: PinId = 36; // ADC1_CH0 — Play/Pause (analog threshold)
pub const PIN_KEY2: PinId = 13; //           Stop (INPUT_PULLUP, active LOW)
pub const PIN_KEY3: PinId = 5;  //           Previous (shared with SD CS)
pub const PIN_KEY4: PinId = 16; //           Next (INPUT_PULLUP, active LOW)
pub const PIN_KEY5: PinId = 18; //           Volume - (shared with SPI SCK)
pub const PIN_KEY6: PinId = 23; //           Volume + (shared with SPI MOSI)

// ---------------------------------------------------------------------------
// SD / SPI Bus
// ---------------------------------------------------------------------------
pub const PIN_SD_CS: PinId = 5;
pub const PIN_SPI_MOSI: PinId = 23;
pub const PIN_SPI_MISO: PinId = 19;
pub const PIN_SPI_SCK: PinId = 18;

/// Pin modes the SD card driver expects while it owns the bus.
pub const BUS_PINS: [BusPin; 4] = [
    BusPin::new(PIN_SPI_MOSI, PinMode::Output),
    BusPin::new(PIN_SPI_MISO, PinMode::Input),
    BusPin::new(PIN_SPI_SCK, PinMode::Output),
    BusPin::new(PIN_SD_CS, PinMode::Output),
];

// ---------------------------------------------------------------------------
// Logical Input Channels
// ---------------------------------------------------------------------------
pub const CHANNEL_COUNT: usize = 6;

pub const CHANNELS: [ChannelSource; CHANNEL_COUNT] = [
    ChannelSource::Analog(PIN_KEY1),
    ChannelSource::Digital(PIN_KEY2),
    ChannelSource::Shared(PIN_KEY3),
    ChannelSource::Digital(PIN_KEY4),
    ChannelSource::Shared(PIN_KEY5),
    ChannelSource::Shared(PIN_KEY6),
];

/// Raw ADC reading below which the analog key counts as pressed (0–4095).
pub const BUTTON_ADC_THRESHOLD: u16 = 100;

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_CONTROLS: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const CONTROL_POLL_INTERVAL_MS: u64 = 10; // 100 Hz control loop
pub const STATUS_UPDATE_MS: u64 = 1000;        // debug state dump period
pub const DEBOUNCE_MS: u32 = 50;
pub const LONG_PRESS_MS: u32 = 1000;
pub const DOUBLE_PRESS_WINDOW_MS: u32 = 400;
pub const SHARED_PIN_SETTLE_MS: u32 = 10;

// ---------------------------------------------------------------------------
// Debug
// ---------------------------------------------------------------------------
pub const DEBUG_BUTTON_STATES: bool = cfg!(feature = "debug-buttons");

/// Runtime knobs for [`crate::input::InputStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    pub debounce_ms: u32,
    pub long_press_ms: u32,
    pub double_press_window_ms: u32,
    pub adc_threshold: u16,
    pub settle_ms: u32,
    /// Emit the per-channel dump from `log_states()`.
    pub debug_states: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
            double_press_window_ms: DOUBLE_PRESS_WINDOW_MS,
            adc_threshold: BUTTON_ADC_THRESHOLD,
            settle_ms: SHARED_PIN_SETTLE_MS,
            debug_states: DEBUG_BUTTON_STATES,
        }
    }
}
