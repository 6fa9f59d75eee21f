use thiserror::Error;

use crate::{gpio::GpioError, publisher::PublishError, sensors::SensorError};

#[derive(Debug, Error)]
pub enum DistancePublisherError {
    #[error("gpio: {0}")]
    Gpio(#[from] GpioError),
    #[error("sensor: {0}")]
    Sensor(#[from] SensorError),
    #[error("publish: {0}")]
    Publish(#[from] PublishError),
    #[error("could not install signal handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),
}
