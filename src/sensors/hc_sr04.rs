use std::{fmt, time::Duration};

use log::{info, warn};

use super::{DistanceSource, Reading, SensorError};
use crate::{
    board::Board,
    config::SensorConfig,
    gpio::{DigitalIn, DigitalOut, GpioError},
    utils::{
        clock::{Clock, MonotonicClock},
        shutdown::{Shutdown, ShutdownNotifier},
    },
};

/// Shortest distance the HC-SR04 is rated for, in centimetres
pub const MIN_RANGE_CM: f64 = 2.0;
/// Longest distance the HC-SR04 is rated for, in centimetres
pub const MAX_RANGE_CM: f64 = 400.0;

/// Edge of the echo pulse a measurement was waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoPhase {
    /// Echo never went high
    Rising,
    /// Echo never went low again
    Falling,
}

impl fmt::Display for EchoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EchoPhase::Rising => f.write_str("rising"),
            EchoPhase::Falling => f.write_str("falling"),
        }
    }
}

/// Simple abstraction of the HCSR04 that facilitates its handling. The sensor owns both of
/// its pins and hands them back when released or dropped.
pub struct HCSR04<C: Clock = MonotonicClock> {
    trig: DigitalOut,
    echo: DigitalIn,
    clock: C,
    config: SensorConfig,
    stop: Option<ShutdownNotifier>,
    released: bool,
}

impl HCSR04<MonotonicClock> {
    pub fn new(trig: DigitalOut, echo: DigitalIn, config: SensorConfig) -> Self {
        Self::with_clock(trig, echo, config, MonotonicClock::new())
    }

    /// Takes the trigger and echo pins named in `config` from the board
    pub fn from_board(board: &mut Board, config: SensorConfig) -> Result<Self, GpioError> {
        let trig = board.set_pin_as_digital_out(config.trigger_pin)?;
        let echo = board.set_pin_as_digital_in(config.echo_pin)?;
        info!("HC-SR04 on trigger pin {} and echo pin {}", config.trigger_pin, config.echo_pin);
        Ok(Self::new(trig, echo, config))
    }
}

impl<C: Clock> HCSR04<C> {
    pub fn with_clock(trig: DigitalOut, echo: DigitalIn, config: SensorConfig, clock: C) -> Self {
        HCSR04 { trig, echo, clock, config, stop: None, released: false }
    }

    /// Makes the echo waits give up with `SensorError::Interrupted` once `shutdown` is
    /// raised, so an echo that never arrives cannot hold the process when no timeout is set
    pub fn stop_on(mut self, shutdown: &Shutdown) -> Self {
        self.stop = Some(shutdown.notifier());
        self
    }

    /// Returns the distance of the object in front of the sensor in centimeters, rounded
    /// to two decimals.
    ///
    /// # Errors
    ///
    /// `EchoTimeout` when the echo does not rise or fall within the configured timeout,
    /// `Interrupted` when a shutdown is raised during the wait, or a GPIO error when the
    /// pins were already released.
    pub fn get_distance(&mut self) -> Result<Reading, SensorError> {
        self.send_trigger_pulse()?;
        let pulse = self.time_echo()?;
        let centimeters = pulse.as_secs_f64() * self.config.speed_of_sound_factor;
        let reading = Reading::centimeters(centimeters)?;
        if !(MIN_RANGE_CM..=MAX_RANGE_CM).contains(&reading.value()) {
            warn!("{reading} cm is outside the sensor range ({MIN_RANGE_CM} to {MAX_RANGE_CM} cm)");
        }
        Ok(reading)
    }

    /// Set the trigger pin high for a few micro-seconds to send the sonic burst
    fn send_trigger_pulse(&mut self) -> Result<(), GpioError> {
        self.trig.set_low()?;
        self.trig.set_high()?;
        self.clock.delay(self.config.trigger_pulse);
        self.trig.set_low()
    }

    /// Busy waits on both edges of the echo, returning the time it stayed high. Each wait
    /// keeps the last timestamp seen before the edge.
    fn time_echo(&mut self) -> Result<Duration, SensorError> {
        let sampling_began = self.clock.now();

        let mut start = sampling_began;
        while self.echo.is_low()? {
            start = self.clock.now();
            self.check_wait(sampling_began, start, EchoPhase::Rising)?;
        }

        let mut end = start;
        while self.echo.is_high()? {
            end = self.clock.now();
            self.check_wait(start, end, EchoPhase::Falling)?;
        }

        Ok(end.saturating_sub(start))
    }

    fn check_wait(
        &self,
        since: Duration,
        now: Duration,
        phase: EchoPhase,
    ) -> Result<(), SensorError> {
        if self.stop.as_ref().is_some_and(ShutdownNotifier::is_requested) {
            return Err(SensorError::Interrupted);
        }
        match self.config.echo_timeout {
            Some(timeout) if now.saturating_sub(since) > timeout => {
                Err(SensorError::EchoTimeout { phase })
            }
            _ => Ok(()),
        }
    }

    /// Hands both pins back to the system. Only the first call does anything; returns
    /// whether this call released them.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.trig.release();
        self.echo.release();
        info!("GPIO pins {} and {} released", self.trig.pin(), self.echo.pin());
        true
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<C: Clock> DistanceSource for HCSR04<C> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.get_distance()
    }

    fn release(&mut self) {
        HCSR04::release(self);
    }
}

impl<C: Clock> Drop for HCSR04<C> {
    fn drop(&mut self) {
        HCSR04::release(self);
    }
}
