// Forest Sentinels — Control Dispatch
//
// Turns per-poll press classifications into `ControlEvent`s for the playback,
// volume and animation side. The control loop spins faster than the debounce
// gate, so each effective update is dispatched exactly once.

use crate::config::CHANNEL_COUNT;
use crate::events::{ControlEvent, Intent, PressType};
use crate::hal::{Clock, PinIo};
use crate::input::InputStateMachine;

#[derive(Debug, Default)]
pub struct ControlDispatcher {
    holding: [bool; CHANNEL_COUNT],
    dispatched_update: Option<u32>,
}

impl ControlDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every channel once per effective update. A long hold is
    /// reported once and re-armed when the key is released.
    pub fn poll<B: PinIo + Clock>(&mut self, input: &mut InputStateMachine<B>) -> Vec<ControlEvent> {
        let update = input.last_update_ms();
        if self.dispatched_update == Some(update) {
            return Vec::new();
        }
        self.dispatched_update = Some(update);

        let mut events = Vec::new();
        for channel in 0..CHANNEL_COUNT {
            match input.press_type(channel) {
                PressType::Long if !self.holding[channel] => {
                    self.holding[channel] = true;
                    events.push(ControlEvent::Hold(channel));
                }
                PressType::Short => {
                    if let Some(intent) = Intent::for_channel(channel) {
                        events.push(ControlEvent::Intent(intent));
                    }
                }
                PressType::Double => events.push(ControlEvent::DoubleTap(channel)),
                _ => {}
            }

            if !input.is_pressed(channel) {
                self.holding[channel] = false;
            }
        }
        events
    }
}
