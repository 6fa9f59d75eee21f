use rand::{rngs::ThreadRng, Rng};

use super::{DistanceSource, Reading, SensorError};

pub const SIMULATED_MIN: u32 = 0;
pub const SIMULATED_MAX: u32 = 30;

/// Stands in for the sensor, producing uniformly distributed whole distances
pub struct Simulator<R: Rng = ThreadRng> {
    rng: R,
}

impl Simulator<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for Simulator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Simulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DistanceSource for Simulator<R> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        Ok(Reading::Whole(self.rng.gen_range(SIMULATED_MIN..=SIMULATED_MAX)))
    }
}
