use rppal::gpio::{self, Gpio, InputPin, OutputPin};

use crate::gpio::{GpioBackend, GpioError, InputLine, Level, OutputLine};

/// GPIO backend for the Raspberry Pi, built on `rppal`. rppal puts every pin back into
/// the mode it found it in when the pin is dropped, which is how lines get released.
pub struct RppalBackend {
    gpio: Gpio,
}

struct RppalOutput(OutputPin);

struct RppalInput(InputPin);

impl RppalBackend {
    pub fn new() -> Result<RppalBackend, GpioError> {
        let gpio = Gpio::new().map_err(|err| GpioError::Controller(err.to_string()))?;
        Ok(RppalBackend { gpio })
    }

    fn pin(&self, bcm: u8) -> Result<gpio::Pin, GpioError> {
        self.gpio
            .get(bcm)
            .map_err(|err| GpioError::PinUnavailable { pin: bcm, reason: err.to_string() })
    }
}

impl GpioBackend for RppalBackend {
    fn output_line(&mut self, bcm: u8) -> Result<Box<dyn OutputLine>, GpioError> {
        Ok(Box::new(RppalOutput(self.pin(bcm)?.into_output_low())))
    }

    fn input_line(&mut self, bcm: u8) -> Result<Box<dyn InputLine>, GpioError> {
        Ok(Box::new(RppalInput(self.pin(bcm)?.into_input())))
    }
}

impl OutputLine for RppalOutput {
    fn set_level(&mut self, level: Level) {
        self.0.write(level.into());
    }
}

impl InputLine for RppalInput {
    fn read(&self) -> Level {
        self.0.read().into()
    }
}

impl From<Level> for gpio::Level {
    fn from(level: Level) -> gpio::Level {
        match level {
            Level::Low => gpio::Level::Low,
            Level::High => gpio::Level::High,
        }
    }
}

impl From<gpio::Level> for Level {
    fn from(level: gpio::Level) -> Level {
        match level {
            gpio::Level::Low => Level::Low,
            gpio::Level::High => Level::High,
        }
    }
}
