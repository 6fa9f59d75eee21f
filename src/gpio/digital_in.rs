use super::{GpioError, InputLine, Level};

/// Driver for receiving digital inputs from a particular Pin
pub struct DigitalIn {
    pin: u8,
    line: Option<Box<dyn InputLine>>,
}

impl DigitalIn {
    pub fn new(pin: u8, line: Box<dyn InputLine>) -> DigitalIn {
        DigitalIn { pin, line: Some(line) }
    }

    /// Number the pin was requested with
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Get the current level of the pin
    pub fn get_level(&self) -> Result<Level, GpioError> {
        self.line
            .as_ref()
            .map(|line| line.read())
            .ok_or(GpioError::Released(self.pin))
    }

    /// Verifies if the pin level is High
    pub fn is_high(&self) -> Result<bool, GpioError> {
        Ok(self.get_level()? == Level::High)
    }

    /// Verifies if the pin level is Low
    pub fn is_low(&self) -> Result<bool, GpioError> {
        Ok(self.get_level()? == Level::Low)
    }

    /// Hands the pin back to the system. Returns false if it had already been released.
    pub fn release(&mut self) -> bool {
        self.line.take().is_some()
    }

    pub fn is_released(&self) -> bool {
        self.line.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLine(Level);

    impl InputLine for FixedLine {
        fn read(&self) -> Level {
            self.0
        }
    }

    #[test]
    fn reads_line_level() {
        let input = DigitalIn::new(17, Box::new(FixedLine(Level::High)));
        assert!(input.is_high().unwrap());
        assert!(!input.is_low().unwrap());
    }

    #[test]
    fn released_pin_cannot_be_read() {
        let mut input = DigitalIn::new(17, Box::new(FixedLine(Level::Low)));
        assert!(input.release());
        assert!(input.is_released());
        assert!(matches!(input.get_level(), Err(GpioError::Released(17))));
    }
}
