//! Publishes a random distance between 0 and 30 to `./distance` every second. The file
//! is removed on exit.

use distance_publisher::{config::PollConfig, init_logger, sensors::Simulator, PollLoop, Shutdown};
use log::{error, info};

fn main() {
    init_logger();
    info!("starting...");

    let shutdown = match Shutdown::install() {
        Ok(shutdown) => shutdown,
        Err(err) => {
            error!("{err}");
            info!("done");
            return;
        }
    };

    let mut poll_loop = PollLoop::new(Simulator::new(), PollConfig::simulator());
    info!("running...");
    let termination = poll_loop.run(&shutdown);
    poll_loop.finish(&termination);
}
