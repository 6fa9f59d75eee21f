//! Compile-time settings of both publishing loops. Nothing here is read from files, flags
//! or the environment.

use std::{path::PathBuf, time::Duration};

use crate::board::PinNumbering;

pub const PUBLISHED_PATH: &str = "./distance";
pub const SIMULATOR_INTERVAL: Duration = Duration::from_secs(1);
pub const SENSOR_INTERVAL: Duration = Duration::from_secs(5);
pub const STOP_POLL: Duration = Duration::from_millis(50);

pub const TRIGGER_PIN: u8 = 18;
pub const ECHO_PIN: u8 = 11;
pub const TRIGGER_PULSE: Duration = Duration::from_micros(10);
pub const ECHO_TIMEOUT: Duration = Duration::from_millis(100);
/// Centimetres per second of echo, half the speed of sound to account for the round trip
pub const SPEED_OF_SOUND_FACTOR: f64 = 17150.0;

/// What happens to the published file once the loop stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownAction {
    RemoveFile,
    KeepFile,
}

/// Settings of the publishing loop
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub path: PathBuf,
    pub interval: Duration,
    /// Granularity at which a stop request is noticed while sleeping
    pub stop_poll: Duration,
    /// Write to a sibling temporary file and rename it over `path`
    pub atomic_write: bool,
    pub shutdown_action: ShutdownAction,
    /// Stop after this many ticks. `None` runs until interrupted.
    pub max_ticks: Option<u64>,
}

impl PollConfig {
    /// Settings of the simulator: a tick per second, file removed on exit
    pub fn simulator() -> Self {
        Self {
            path: PathBuf::from(PUBLISHED_PATH),
            interval: SIMULATOR_INTERVAL,
            stop_poll: STOP_POLL,
            atomic_write: false,
            shutdown_action: ShutdownAction::RemoveFile,
            max_ticks: None,
        }
    }

    /// Settings of the sensor loop: a tick every five seconds, file left on disk on exit
    pub fn sensor() -> Self {
        Self {
            interval: SENSOR_INTERVAL,
            shutdown_action: ShutdownAction::KeepFile,
            ..Self::simulator()
        }
    }
}

/// Wiring and timing of the HC-SR04
#[derive(Debug, Clone, Copy)]
pub struct SensorConfig {
    pub numbering: PinNumbering,
    pub trigger_pin: u8,
    pub echo_pin: u8,
    pub trigger_pulse: Duration,
    /// Longest wait for each edge of the echo. `None` waits until the edge arrives, or
    /// until a shutdown when the sensor was built with `HCSR04::stop_on`.
    pub echo_timeout: Option<Duration>,
    pub speed_of_sound_factor: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            numbering: PinNumbering::Physical,
            trigger_pin: TRIGGER_PIN,
            echo_pin: ECHO_PIN,
            trigger_pulse: TRIGGER_PULSE,
            echo_timeout: Some(ECHO_TIMEOUT),
            speed_of_sound_factor: SPEED_OF_SOUND_FACTOR,
        }
    }
}
