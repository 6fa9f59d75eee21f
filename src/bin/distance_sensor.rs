//! Measures the distance with an HC-SR04 wired to physical pins 18 (trigger) and 11 (echo)
//! and publishes it to `./distance` every five seconds. The pins are released on exit and
//! the file is left in place.

use distance_publisher::{
    config::{PollConfig, SensorConfig},
    distance_publisher_error::DistancePublisherError,
    init_logger,
    sensors::HCSR04,
    Board, PollLoop, Shutdown,
};
use log::{error, info};

fn main() {
    init_logger();
    info!("Running {} build, version: {}", std::env::consts::ARCH, env!("CARGO_PKG_VERSION"));

    match start() {
        Ok((mut poll_loop, shutdown)) => {
            let termination = poll_loop.run(&shutdown);
            poll_loop.finish(&termination);
        }
        Err(err) => error!("{err}"),
    }
}

fn start() -> Result<(PollLoop<HCSR04>, Shutdown), DistancePublisherError> {
    let config = SensorConfig::default();
    let shutdown = Shutdown::install()?;
    let mut board = Board::raspberry_pi(config.numbering)?;
    let sensor = HCSR04::from_board(&mut board, config)?.stop_on(&shutdown);
    Ok((PollLoop::new(sensor, PollConfig::sensor()), shutdown))
}
