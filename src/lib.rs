//! Publishes the latest distance seen by an HC-SR04 ultrasonic sensor, or by a simulator
//! standing in for it, to a single file.

mod utils;

pub mod board;
pub mod config;
pub mod gpio;
pub mod poll_loop;
pub mod publisher;
pub mod sensors;

pub use board::Board;
pub use poll_loop::{PollLoop, Termination};
pub use publisher::Publisher;
pub use utils::clock;
pub use utils::distance_publisher_error;
pub use utils::shutdown::{Shutdown, ShutdownNotifier};

/// Logger used by both binaries: `info` unless `RUST_LOG` says otherwise
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
