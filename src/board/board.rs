use log::debug;

use super::pins::{PinNumbering, Pins};
use crate::gpio::{DigitalIn, DigitalOut, GpioBackend, GpioError};

/// Primary abstraction for interacting with the board GPIO header. It replaces global pin
/// configuration with an explicit handle: pins are taken from it one at a time and each
/// taken pin owns its line, handing it back to the system when released or dropped.
///
/// - `backend`: hands out the hardware lines, addressed by BCM number.
/// - `pins`: numbering scheme used by callers and the record of pins already taken.
pub struct Board {
    backend: Box<dyn GpioBackend>,
    pins: Pins,
}

impl Board {
    /// Creates a new Board over `backend`, interpreting pin numbers with `numbering`
    pub fn new<B: GpioBackend + 'static>(backend: B, numbering: PinNumbering) -> Board {
        Board { backend: Box::new(backend), pins: Pins::new(numbering) }
    }

    /// Opens the Raspberry Pi GPIO controller
    #[cfg(feature = "rpi")]
    pub fn raspberry_pi(numbering: PinNumbering) -> Result<Board, GpioError> {
        Ok(Board::new(super::RppalBackend::new()?, numbering))
    }

    pub fn numbering(&self) -> PinNumbering {
        self.pins.numbering()
    }

    /// Creates a DigitalOut on the pin with number `pin_num`, initially driven Low.
    ///
    /// # Errors
    ///
    /// `NotAGpioPin` if the number is not a GPIO line, `PinAlreadyTaken` if it was already
    /// handed out, or whatever the backend reports when it cannot configure the line.
    pub fn set_pin_as_digital_out(&mut self, pin_num: u8) -> Result<DigitalOut, GpioError> {
        let bcm = self.pins.take(pin_num)?;
        match self.backend.output_line(bcm) {
            Ok(line) => {
                debug!("pin {pin_num} (BCM {bcm}) configured as output");
                Ok(DigitalOut::new(pin_num, line))
            }
            Err(err) => {
                self.pins.give_back(bcm);
                Err(err)
            }
        }
    }

    /// Creates a DigitalIn on the pin with number `pin_num`.
    ///
    /// # Errors
    ///
    /// Same as [Board::set_pin_as_digital_out].
    pub fn set_pin_as_digital_in(&mut self, pin_num: u8) -> Result<DigitalIn, GpioError> {
        let bcm = self.pins.take(pin_num)?;
        match self.backend.input_line(bcm) {
            Ok(line) => {
                debug!("pin {pin_num} (BCM {bcm}) configured as input");
                Ok(DigitalIn::new(pin_num, line))
            }
            Err(err) => {
                self.pins.give_back(bcm);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{InputLine, Level, OutputLine};

    struct NullLine;

    impl OutputLine for NullLine {
        fn set_level(&mut self, _level: Level) {}
    }

    impl InputLine for NullLine {
        fn read(&self) -> Level {
            Level::Low
        }
    }

    #[derive(Default)]
    struct NullBackend {
        refuse: Option<u8>,
    }

    impl GpioBackend for NullBackend {
        fn output_line(&mut self, bcm: u8) -> Result<Box<dyn OutputLine>, GpioError> {
            if self.refuse == Some(bcm) {
                return Err(GpioError::PinUnavailable { pin: bcm, reason: "busy".into() });
            }
            Ok(Box::new(NullLine))
        }

        fn input_line(&mut self, _bcm: u8) -> Result<Box<dyn InputLine>, GpioError> {
            Ok(Box::new(NullLine))
        }
    }

    #[test]
    fn hands_out_each_pin_once() {
        let mut board = Board::new(NullBackend::default(), PinNumbering::Physical);
        let trig = board.set_pin_as_digital_out(18).unwrap();
        let echo = board.set_pin_as_digital_in(11).unwrap();
        assert_eq!((trig.pin(), echo.pin()), (18, 11));

        assert!(matches!(board.set_pin_as_digital_in(18), Err(GpioError::PinAlreadyTaken(18))));
        assert!(matches!(board.set_pin_as_digital_out(9), Err(GpioError::NotAGpioPin(9))));
    }

    #[test]
    fn refused_pin_can_be_requested_again() {
        let backend = NullBackend { refuse: Some(24) };
        let mut board = Board::new(backend, PinNumbering::Bcm);
        assert!(board.set_pin_as_digital_out(24).is_err());
        assert!(board.set_pin_as_digital_in(24).is_ok());
    }
}
