// Forest Sentinels — Hardware Seam
//
// The input state machine only talks to the board through these two traits,
// so the firmware can plug in ESP-IDF and the host tests an in-memory board.

/// GPIO number as used by ESP-IDF.
pub type PinId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    InputPullUp,
    Output,
}

/// A peripheral-bus pin together with the mode the bus needs it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusPin {
    pub pin: PinId,
    pub mode: PinMode,
}

impl BusPin {
    pub const fn new(pin: PinId, mode: PinMode) -> Self {
        Self { pin, mode }
    }
}

/// Pin configuration and sampling primitives.
pub trait PinIo {
    fn set_mode(&mut self, pin: PinId, mode: PinMode);

    /// `true` when the pin reads HIGH.
    fn read_digital(&mut self, pin: PinId) -> bool;

    /// Raw 12-bit ADC sample (0–4095).
    fn read_analog(&mut self, pin: PinId) -> u16;

    /// Block the calling task for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Monotonic millisecond clock. Wraps at ~49 days; callers use wrapping math.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

#[cfg(test)]
pub mod fake {
    //! In-memory board for host tests. Clones share the same state, so a test
    //! can keep a handle while the state machine owns another.

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct State {
        now: u32,
        modes: HashMap<PinId, PinMode>,
        lows: HashMap<PinId, bool>,
        analog: HashMap<PinId, u16>,
        delays: Vec<u32>,
        reads: Vec<PinId>,
        panic_on_read: Option<PinId>,
    }

    #[derive(Clone, Default)]
    pub struct FakeBoard {
        state: Rc<RefCell<State>>,
    }

    impl FakeBoard {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_time(&self, now: u32) {
            self.state.borrow_mut().now = now;
        }

        pub fn advance(&self, ms: u32) {
            let mut state = self.state.borrow_mut();
            state.now = state.now.wrapping_add(ms);
        }

        /// Drive a digital pin LOW (`true`) or back to its idle HIGH.
        pub fn hold_low(&self, pin: PinId, low: bool) {
            self.state.borrow_mut().lows.insert(pin, low);
        }

        pub fn set_analog(&self, pin: PinId, sample: u16) {
            self.state.borrow_mut().analog.insert(pin, sample);
        }

        pub fn mode(&self, pin: PinId) -> Option<PinMode> {
            self.state.borrow().modes.get(&pin).copied()
        }

        pub fn delays(&self) -> Vec<u32> {
            self.state.borrow().delays.clone()
        }

        pub fn reads(&self) -> Vec<PinId> {
            self.state.borrow().reads.clone()
        }

        pub fn panic_on_read(&self, pin: PinId) {
            self.state.borrow_mut().panic_on_read = Some(pin);
        }
    }

    impl PinIo for FakeBoard {
        fn set_mode(&mut self, pin: PinId, mode: PinMode) {
            self.state.borrow_mut().modes.insert(pin, mode);
        }

        fn read_digital(&mut self, pin: PinId) -> bool {
            let (low, fail) = {
                let mut state = self.state.borrow_mut();
                state.reads.push(pin);
                let low = state.lows.get(&pin).copied().unwrap_or(false);
                (low, state.panic_on_read == Some(pin))
            };
            if fail {
                panic!("simulated read fault on GPIO{pin}");
            }
            !low
        }

        fn read_analog(&mut self, pin: PinId) -> u16 {
            let mut state = self.state.borrow_mut();
            state.reads.push(pin);
            state.analog.get(&pin).copied().unwrap_or(4095)
        }

        fn delay_ms(&mut self, ms: u32) {
            let mut state = self.state.borrow_mut();
            state.delays.push(ms);
            state.now = state.now.wrapping_add(ms);
        }
    }

    impl Clock for FakeBoard {
        fn now_ms(&self) -> u32 {
            self.state.borrow().now
        }
    }
}
