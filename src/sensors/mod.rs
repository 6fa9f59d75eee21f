mod hc_sr04;
mod reading;
mod simulator;

use thiserror::Error;

use crate::gpio::GpioError;

pub use hc_sr04::*;
pub use reading::*;
pub use simulator::*;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error(transparent)]
    Gpio(#[from] GpioError),
    #[error("echo timed out waiting for the {phase} edge")]
    EchoTimeout { phase: EchoPhase },
    #[error("measurement interrupted by shutdown")]
    Interrupted,
    #[error("invalid reading {0}")]
    InvalidReading(f64),
}

/// Anything the polling loop can take a distance from
pub trait DistanceSource {
    /// Produces the next reading. May block for as long as the measurement takes.
    fn read(&mut self) -> Result<Reading, SensorError>;

    /// Gives back any hardware held by the source. Called once when the loop stops.
    fn release(&mut self) {}
}
