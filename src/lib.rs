// Forest Sentinels — Button Input Subsystem
//
// Debounced key handling for the AudioKit board: press classification,
// SD/SPI shared-pin arbitration and control-event dispatch. Hardware access
// goes through the `hal` traits so the logic runs on the host as well.

pub mod bus;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod hal;
pub mod input;
