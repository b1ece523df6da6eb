// Forest Sentinels — Controls Task
//
// Owns the button state machine. Advances it at ~100 Hz and forwards
// classified presses to the playback/volume/animation side.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use forest_sentinels::config::*;
use forest_sentinels::dispatch::ControlDispatcher;
use forest_sentinels::events::ControlEvent;
use forest_sentinels::input::InputStateMachine;

use crate::drivers::board::EspBoard;

pub fn controls_task(mut input: InputStateMachine<EspBoard>, events_tx: Sender<ControlEvent>) {
    log::info!("Controls task started");

    let mut dispatcher = ControlDispatcher::new();
    let poll_interval = Duration::from_millis(CONTROL_POLL_INTERVAL_MS);
    let status_interval = Duration::from_millis(STATUS_UPDATE_MS);
    let mut last_status = Instant::now();

    loop {
        // 1. Advance debounce + classification (self-gated to DEBOUNCE_MS).
        input.update();

        // 2. Forward anything that completed on this cycle.
        for event in dispatcher.poll(&mut input) {
            if events_tx.send(event).is_err() {
                log::error!("Control event receiver dropped — stopping controls task");
                return;
            }
        }

        // 3. Periodic state dump (only when debug_states is on).
        if last_status.elapsed() >= status_interval {
            input.log_states();
            last_status = Instant::now();
        }

        thread::sleep(poll_interval);
    }
}
