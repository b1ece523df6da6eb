// Forest Sentinels — SD/SPI Bus Pin Arbitration
//
// KEY3, KEY5 and KEY6 sit on SD CS, SPI SCK and SPI MOSI. The SD driver owns
// those pins; a key read borrows one for a few milliseconds and hands the
// whole bus back in the guard's `Drop`, so the bus is restored on every exit
// path, unwinding included.

use crate::hal::{BusPin, PinId, PinIo, PinMode};

/// Put every bus pin back into the mode the SD driver expects.
pub fn restore_bus_configuration<P: PinIo>(io: &mut P, bus: &[BusPin]) {
    for bus_pin in bus {
        io.set_mode(bus_pin.pin, bus_pin.mode);
    }
}

/// Scoped claim on a shared pin. Holding `&mut` to the pin I/O keeps any
/// other bus user out until the guard is dropped.
pub struct SharedPinGuard<'a, P: PinIo> {
    io: &'a mut P,
    pin: PinId,
    bus: &'a [BusPin],
}

impl<'a, P: PinIo> SharedPinGuard<'a, P> {
    /// Reconfigure `pin` as a pulled-up input and wait for it to settle.
    /// `None` for a pin outside `bus`: `Drop` could not put it back.
    pub fn acquire(io: &'a mut P, pin: PinId, bus: &'a [BusPin], settle_ms: u32) -> Option<Self> {
        if !bus.iter().any(|bus_pin| bus_pin.pin == pin) {
            return None;
        }
        let mut guard = Self { io, pin, bus };
        guard.io.set_mode(pin, PinMode::InputPullUp);
        guard.io.delay_ms(settle_ms);
        Some(guard)
    }

    /// Active LOW: `true` means the key is pressed.
    pub fn sample(&mut self) -> bool {
        !self.io.read_digital(self.pin)
    }
}

impl<P: PinIo> Drop for SharedPinGuard<'_, P> {
    fn drop(&mut self) {
        restore_bus_configuration(&mut *self.io, self.bus);
        log::trace!("GPIO{} returned to SD/SPI bus", self.pin);
    }
}

/// One-shot read of a shared key. Pins outside `bus` read inactive and are
/// left untouched.
pub fn read_shared<P: PinIo>(io: &mut P, pin: PinId, bus: &[BusPin], settle_ms: u32) -> bool {
    let Some(mut guard) = SharedPinGuard::acquire(io, pin, bus, settle_ms) else {
        log::warn!("GPIO{} is not an SD/SPI bus pin — not sampling", pin);
        return false;
    };
    guard.sample()
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::config::{BUS_PINS, PIN_KEY1, PIN_KEY5, PIN_SPI_MISO, SHARED_PIN_SETTLE_MS};
    use crate::hal::fake::FakeBoard;

    fn board_with_bus_configured() -> FakeBoard {
        let mut board = FakeBoard::new();
        restore_bus_configuration(&mut board, &BUS_PINS);
        board
    }

    fn assert_bus_restored(board: &FakeBoard) {
        for bus_pin in BUS_PINS {
            assert_eq!(board.mode(bus_pin.pin), Some(bus_pin.mode), "GPIO{}", bus_pin.pin);
        }
    }

    #[test]
    fn pressed_key_reads_active_and_bus_is_restored() {
        let mut board = board_with_bus_configured();
        board.hold_low(PIN_KEY5, true);

        assert!(read_shared(&mut board, PIN_KEY5, &BUS_PINS, SHARED_PIN_SETTLE_MS));
        assert_bus_restored(&board);
    }

    #[test]
    fn released_key_reads_inactive_and_bus_is_restored() {
        let mut board = board_with_bus_configured();

        assert!(!read_shared(&mut board, PIN_KEY5, &BUS_PINS, SHARED_PIN_SETTLE_MS));
        assert_bus_restored(&board);
    }

    #[test]
    fn pin_is_pulled_up_and_settled_while_held() {
        let mut board = board_with_bus_configured();
        let handle = board.clone();
        {
            let mut guard = SharedPinGuard::acquire(&mut board, PIN_KEY5, &BUS_PINS, 12)
                .expect("KEY5 sits on SPI SCK");
            assert_eq!(handle.mode(PIN_KEY5), Some(PinMode::InputPullUp));
            assert_eq!(handle.delays(), vec![12]);
            let _ = guard.sample();
        }
        assert_eq!(handle.mode(PIN_KEY5), Some(PinMode::Output));
        assert_eq!(handle.mode(PIN_SPI_MISO), Some(PinMode::Input));
    }

    #[test]
    fn bus_is_restored_when_the_read_unwinds() {
        let mut board = board_with_bus_configured();
        let handle = board.clone();
        board.panic_on_read(PIN_KEY5);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            read_shared(&mut board, PIN_KEY5, &BUS_PINS, SHARED_PIN_SETTLE_MS)
        }));

        assert!(result.is_err());
        assert_bus_restored(&handle);
    }

    #[test]
    fn non_bus_pin_is_left_alone() {
        let mut board = board_with_bus_configured();
        board.set_mode(PIN_KEY1, PinMode::Input);
        board.hold_low(PIN_KEY1, true);

        assert!(!read_shared(&mut board, PIN_KEY1, &BUS_PINS, SHARED_PIN_SETTLE_MS));
        assert_eq!(board.mode(PIN_KEY1), Some(PinMode::Input));
        assert!(board.delays().is_empty());
        assert!(board.reads().is_empty());
        assert!(SharedPinGuard::acquire(&mut board, PIN_KEY1, &BUS_PINS, 10).is_none());
        assert_eq!(board.mode(PIN_KEY1), Some(PinMode::Input));
    }
}
