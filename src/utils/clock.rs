use std::{thread, time::{Duration, Instant}};

/// Source of time for measurements. Readings are durations since an arbitrary origin
/// fixed for the lifetime of the clock.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Blocks the current thread for at least `duration`
    fn delay(&self, duration: Duration);
}

/// Clock backed by the monotonic system clock
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        MonotonicClock { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn delay(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let before = clock.now();
        clock.delay(Duration::from_micros(10));
        assert!(clock.now() >= before + Duration::from_micros(10));
    }
}
