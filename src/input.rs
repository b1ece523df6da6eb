// Forest Sentinels — Button Input State Machine
//
// Time-gated debounce with short, long and double press classification for
// the six AudioKit keys. Polled once per control cycle; no interrupts.

use crate::bus;
use crate::config::{InputConfig, BUS_PINS, CHANNELS, CHANNEL_COUNT};
use crate::events::{ChannelSource, Intent, PressType};
use crate::hal::{BusPin, Clock, PinId, PinIo, PinMode};

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    raw_state: bool,
    previous_state: bool,
    press_start_time: u32,
    last_press_time: u32,
    is_pressed: bool,
    long_press_fired: bool,
    consecutive_count: u32,

    // Edges seen on the last effective update; cleared on the next one.
    rose: bool,
    fell: bool,
}

impl ChannelState {
    fn step(&mut self, active: bool, now: u32, config: &InputConfig) {
        self.raw_state = active;
        self.rose = self.raw_state && !self.previous_state;
        self.fell = !self.raw_state && self.previous_state;

        if self.rose {
            self.press_start_time = now;
            self.is_pressed = true;
            self.long_press_fired = false;

            if now.wrapping_sub(self.last_press_time) < config.double_press_window_ms {
                self.consecutive_count += 1;
            } else {
                self.consecutive_count = 1;
            }
            self.last_press_time = now;
        }

        if self.is_pressed
            && self.raw_state
            && !self.long_press_fired
            && now.wrapping_sub(self.press_start_time) >= config.long_press_ms
        {
            self.long_press_fired = true;
        }

        if self.fell {
            self.is_pressed = false;
        }

        self.previous_state = self.raw_state;
    }

    fn peek(&self) -> PressType {
        if self.long_press_fired && self.raw_state {
            return PressType::Long;
        }

        if self.fell && !self.long_press_fired {
            if self.consecutive_count >= 2 {
                return PressType::Double;
            }
            return PressType::Short;
        }

        PressType::None
    }

    fn take(&mut self) -> PressType {
        let press = self.peek();
        if press == PressType::Double {
            self.consecutive_count = 0;
        }
        press
    }
}

pub struct InputStateMachine<B> {
    board: B,
    config: InputConfig,
    sources: [ChannelSource; CHANNEL_COUNT],
    bus: &'static [BusPin],
    channels: [ChannelState; CHANNEL_COUNT],
    last_update: u32,
}

impl<B: PinIo + Clock> InputStateMachine<B> {
    /// Machine wired to the AudioKit key layout.
    pub fn new(board: B, config: InputConfig) -> Self {
        Self::with_layout(board, config, CHANNELS, &BUS_PINS)
    }

    pub fn with_layout(
        board: B,
        config: InputConfig,
        sources: [ChannelSource; CHANNEL_COUNT],
        bus: &'static [BusPin],
    ) -> Self {
        Self {
            board,
            config,
            sources,
            bus,
            channels: [ChannelState::default(); CHANNEL_COUNT],
            last_update: 0,
        }
    }

    /// Clock value of the last effective [`Self::update`].
    pub fn last_update_ms(&self) -> u32 {
        self.last_update
    }

    /// Configure the dedicated key pins. Shared keys are left to the SD/SPI
    /// bus and only touched through [`Self::read_shared_channel`].
    pub fn begin(&mut self) {
        log::info!("Initialising button input ({} channels)", CHANNEL_COUNT);

        for (index, source) in self.sources.iter().enumerate() {
            match *source {
                ChannelSource::Analog(pin) => self.board.set_mode(pin, PinMode::Input),
                ChannelSource::Digital(pin) => self.board.set_mode(pin, PinMode::InputPullUp),
                ChannelSource::Shared(_) => {}
            }
            log::info!("  KEY{} (GPIO{}): {}", index + 1, source.pin(), source.kind());
        }
    }

    /// Advance every channel. A no-op until `debounce_ms` has passed since
    /// the last effective run.
    pub fn update(&mut self) {
        let now = self.board.now_ms();
        if now.wrapping_sub(self.last_update) < self.config.debounce_ms {
            return;
        }

        for index in 0..CHANNEL_COUNT {
            let active = self.read_channel(index);
            let sampled_at = self.board.now_ms();
            self.channels[index].step(active, sampled_at, &self.config);
        }
        self.last_update = now;
    }

    fn read_channel(&mut self, index: usize) -> bool {
        match self.sources[index] {
            ChannelSource::Analog(pin) => self.board.read_analog(pin) < self.config.adc_threshold,
            ChannelSource::Digital(pin) => !self.board.read_digital(pin),
            // Left alone so a running SD transfer is never disturbed.
            ChannelSource::Shared(_) => false,
        }
    }

    /// Sample a key that shares its pin with the SD/SPI bus. The bus pins are
    /// back in their bus modes when this returns, whatever the outcome. A pin
    /// that is not on the bus reads inactive and keeps its mode.
    pub fn read_shared_channel(&mut self, pin: PinId) -> bool {
        bus::read_shared(&mut self.board, pin, self.bus, self.config.settle_ms)
    }

    pub fn is_pressed(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|state| state.raw_state)
    }

    pub fn was_pressed(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|state| state.rose)
    }

    pub fn was_released(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|state| state.fell)
    }

    /// Classify the channel's current press. Reporting `Double` clears the
    /// consecutive-press counter, so a second query on the same poll sees
    /// `Short`.
    pub fn press_type(&mut self, channel: usize) -> PressType {
        match self.channels.get_mut(channel) {
            Some(state) => state.take(),
            None => PressType::None,
        }
    }

    pub fn intent_triggered(&mut self, intent: Intent) -> bool {
        self.press_type(intent.channel()) == PressType::Short
    }

    pub fn play_pause_pressed(&mut self) -> bool {
        self.intent_triggered(Intent::PlayPause)
    }

    pub fn stop_pressed(&mut self) -> bool {
        self.intent_triggered(Intent::Stop)
    }

    pub fn previous_pressed(&mut self) -> bool {
        self.intent_triggered(Intent::Previous)
    }

    pub fn next_pressed(&mut self) -> bool {
        self.intent_triggered(Intent::Next)
    }

    pub fn volume_up_pressed(&mut self) -> bool {
        self.intent_triggered(Intent::VolumeUp)
    }

    pub fn volume_down_pressed(&mut self) -> bool {
        self.intent_triggered(Intent::VolumeDown)
    }

    /// Human-readable dump of every channel. Does not consume presses.
    pub fn states(&self) -> String {
        let mut out = String::from("=== Button States ===\n");
        for (index, (source, state)) in self.sources.iter().zip(&self.channels).enumerate() {
            out.push_str(&format!(
                "KEY{} (GPIO{}, {}): {}",
                index + 1,
                source.pin(),
                source.kind(),
                if state.raw_state { "PRESSED" } else { "RELEASED" },
            ));
            let press = state.peek();
            if press != PressType::None {
                out.push_str(&format!(" [{}]", press.label()));
            }
            out.push('\n');
        }
        out.push_str("=====================");
        out
    }

    /// The state dump, or `None` while `debug_states` is off.
    pub fn dump(&self) -> Option<String> {
        self.config.debug_states.then(|| self.states())
    }

    pub fn log_states(&self) {
        if let Some(dump) = self.dump() {
            for line in dump.lines() {
                log::debug!("{}", line);
            }
        }
    }
}
