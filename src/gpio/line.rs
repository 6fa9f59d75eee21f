use std::ops::Not;
use thiserror::Error;

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("GPIO controller unavailable: {0}")]
    Controller(String),
    #[error("pin {0} is not a GPIO pin")]
    NotAGpioPin(u8),
    #[error("pin {0} was already taken")]
    PinAlreadyTaken(u8),
    #[error("pin {pin} is unavailable: {reason}")]
    PinUnavailable { pin: u8, reason: String },
    #[error("pin {0} was already released")]
    Released(u8),
}

/// Hardware side of a digital output. Dropping the line hands the pin back to the system.
pub trait OutputLine {
    fn set_level(&mut self, level: Level);
}

/// Hardware side of a digital input. Dropping the line hands the pin back to the system.
pub trait InputLine {
    fn read(&self) -> Level;
}

/// Something able to hand out lines addressed by their BCM number
pub trait GpioBackend {
    fn output_line(&mut self, bcm: u8) -> Result<Box<dyn OutputLine>, GpioError>;
    fn input_line(&mut self, bcm: u8) -> Result<Box<dyn InputLine>, GpioError>;
}
