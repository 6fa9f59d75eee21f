use super::{GpioError, Level, OutputLine};

/// Driver to handle a digital output for a particular Pin
pub struct DigitalOut {
    pin: u8,
    line: Option<Box<dyn OutputLine>>,
    level: Level,
}

impl DigitalOut {
    /// Creates a new DigitalOut for the line, driving it Low.
    pub fn new(pin: u8, mut line: Box<dyn OutputLine>) -> DigitalOut {
        line.set_level(Level::Low);
        DigitalOut { pin, line: Some(line), level: Level::Low }
    }

    /// Number the pin was requested with
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Sets the pin level either to High or Low
    pub fn set_level(&mut self, level: Level) -> Result<(), GpioError> {
        let line = self.line.as_mut().ok_or(GpioError::Released(self.pin))?;
        line.set_level(level);
        self.level = level;
        Ok(())
    }

    /// Gets the last level written to the pin
    pub fn get_level(&self) -> Result<Level, GpioError> {
        if self.line.is_none() {
            return Err(GpioError::Released(self.pin));
        }
        Ok(self.level)
    }

    /// Sets the current pin level in High
    pub fn set_high(&mut self) -> Result<(), GpioError> {
        self.set_level(Level::High)
    }

    /// Sets the current pin level in Low
    pub fn set_low(&mut self) -> Result<(), GpioError> {
        self.set_level(Level::Low)
    }

    /// Changes the pin level.
    /// If the current level is High, then the pin changes its level to Low
    /// If the current level is Low, then the pin changes its level to High
    pub fn toggle(&mut self) -> Result<(), GpioError> {
        let level = !self.get_level()?;
        self.set_level(level)
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
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingLine {
        writes: Arc<Mutex<Vec<Level>>>,
    }

    impl OutputLine for RecordingLine {
        fn set_level(&mut self, level: Level) {
            self.writes.lock().unwrap().push(level);
        }
    }

    #[test]
    fn starts_low_and_records_writes() {
        let line = RecordingLine::default();
        let mut out = DigitalOut::new(24, Box::new(line.clone()));
        out.set_high().unwrap();
        out.toggle().unwrap();

        assert_eq!(*line.writes.lock().unwrap(), vec![Level::Low, Level::High, Level::Low]);
        assert_eq!(out.get_level().unwrap(), Level::Low);
    }

    #[test]
    fn released_pin_rejects_writes() {
        let mut out = DigitalOut::new(24, Box::new(RecordingLine::default()));
        assert!(out.release());
        assert!(!out.release());
        assert!(matches!(out.set_high(), Err(GpioError::Released(24))));
    }
}
