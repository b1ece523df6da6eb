// Forest Sentinels — Firmware Entry Point
//
// Boot sequence:
//   1. Initialise logging and the ADC used by the analog key.
//   2. Configure the dedicated key pins (shared SD/SPI keys stay with the bus).
//   3. Spawn the controls task, which polls the keys and emits control events.
//   4. Hand received control events to the playback / volume / animation side
//      (logged here; those controllers live outside this crate).

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::mpsc;
    use std::thread;

    use forest_sentinels::config::*;
    use forest_sentinels::input::InputStateMachine;

    use crate::drivers::board::EspBoard;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Forest Sentinels firmware starting…");

    // ---- Buttons ----------------------------------------------------------
    let board = EspBoard::new()?;
    let mut input = InputStateMachine::new(board, InputConfig::default());
    input.begin();

    // ---- Channels ---------------------------------------------------------
    let (events_tx, events_rx) = mpsc::channel();

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------
    thread::Builder::new()
        .name("controls".into())
        .stack_size(STACK_CONTROLS)
        .spawn(move || {
            tasks::controls::controls_task(input, events_tx);
        })?;

    log::info!("Boot complete — entering normal operation");

    for event in events_rx {
        log::info!("Control event: {:?}", event);
    }

    log::warn!("Controls task exited");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("forest-sentinels firmware only runs on ESP-IDF targets; use `cargo test --lib` on the host");
}
