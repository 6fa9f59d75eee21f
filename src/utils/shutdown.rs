use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use log::info;

use super::distance_publisher_error::DistancePublisherError;

/// Flag raised once the process has been asked to stop
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

/// Handle used to raise a [Shutdown] from elsewhere, typically the signal handler
#[derive(Clone)]
pub struct ShutdownNotifier {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    /// Creates a Shutdown that is only raised through its notifiers
    pub fn new() -> Self {
        Self { requested: Arc::new(AtomicBool::new(false)) }
    }

    /// Creates a Shutdown raised by SIGINT, SIGTERM or SIGHUP. Only one handler can be
    /// installed per process.
    pub fn install() -> Result<Self, DistancePublisherError> {
        let shutdown = Self::new();
        let notifier = shutdown.notifier();
        ctrlc::set_handler(move || {
            info!("Signal received");
            notifier.notify();
        })?;
        Ok(shutdown)
    }

    pub fn notifier(&self) -> ShutdownNotifier {
        ShutdownNotifier::from(self)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Sleeps for `duration`, checking the flag every `slice`. Returns true if the sleep
    /// was cut short because a shutdown was requested.
    pub fn sleep(&self, duration: Duration, slice: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_requested() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            thread::sleep(remaining.min(slice));
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Shutdown> for ShutdownNotifier {
    fn from(value: &Shutdown) -> Self {
        Self { requested: value.requested.clone() }
    }
}

impl ShutdownNotifier {
    pub fn notify(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_runs_to_completion_without_notification() {
        let shutdown = Shutdown::new();
        let started = Instant::now();
        assert!(!shutdown.sleep(Duration::from_millis(20), Duration::from_millis(5)));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn notification_cuts_sleep_short() {
        let shutdown = Shutdown::new();
        let notifier = shutdown.notifier();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            notifier.notify();
        });

        let started = Instant::now();
        assert!(shutdown.sleep(Duration::from_secs(10), Duration::from_millis(5)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(shutdown.is_requested());
        handle.join().unwrap();
    }

    #[test]
    fn only_the_first_install_succeeds() {
        let first = Shutdown::install();
        assert!(first.is_ok());
        assert!(matches!(Shutdown::install(), Err(DistancePublisherError::SignalHandler(_))));
    }
}
