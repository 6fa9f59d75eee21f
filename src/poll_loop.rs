use log::{debug, error, info};

use crate::{
    config::{PollConfig, ShutdownAction},
    publisher::Publisher,
    sensors::{DistanceSource, SensorError},
    utils::{distance_publisher_error::DistancePublisherError, shutdown::Shutdown},
};

/// Why the loop stopped
#[derive(Debug)]
pub enum Termination {
    /// A shutdown was requested
    Interrupted { ticks: u64 },
    /// The configured tick limit was reached
    Completed { ticks: u64 },
    /// A tick failed. The loop stops on the first failure.
    Failed { ticks: u64, error: DistancePublisherError },
}

impl Termination {
    /// Number of ticks that completed successfully
    pub fn ticks(&self) -> u64 {
        match self {
            Termination::Interrupted { ticks }
            | Termination::Completed { ticks }
            | Termination::Failed { ticks, .. } => *ticks,
        }
    }
}

/// Repeatedly takes a reading from the source and publishes it, sleeping `interval`
/// between ticks, until interrupted or a tick fails
pub struct PollLoop<S: DistanceSource> {
    source: S,
    publisher: Publisher,
    config: PollConfig,
}

impl<S: DistanceSource> PollLoop<S> {
    pub fn new(source: S, config: PollConfig) -> Self {
        let publisher = if config.atomic_write {
            Publisher::atomic(&config.path)
        } else {
            Publisher::new(&config.path)
        };
        Self { source, publisher, config }
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Runs a single tick. The reading is taken before the file is touched, so a failing
    /// source leaves the last published value in place.
    pub fn tick(&mut self) -> Result<(), DistancePublisherError> {
        let reading = self.source.read()?;
        self.publisher.publish(&reading)?;
        debug!("distance {reading}");
        Ok(())
    }

    /// Ticks until `shutdown` is raised, the tick limit is reached or a tick fails. A
    /// measurement cut short by the shutdown counts as an interruption.
    pub fn run(&mut self, shutdown: &Shutdown) -> Termination {
        let mut ticks = 0;
        loop {
            if shutdown.is_requested() {
                return Termination::Interrupted { ticks };
            }
            match self.tick() {
                Ok(()) => {}
                Err(DistancePublisherError::Sensor(SensorError::Interrupted)) => {
                    return Termination::Interrupted { ticks };
                }
                Err(error) => return Termination::Failed { ticks, error },
            }
            ticks += 1;
            if self.config.max_ticks.is_some_and(|max| ticks >= max) {
                return Termination::Completed { ticks };
            }
            if shutdown.sleep(self.config.interval, self.config.stop_poll) {
                return Termination::Interrupted { ticks };
            }
        }
    }

    /// Logs how the loop ended and applies the shutdown action. Every termination gets
    /// the same cleanup; failures are only told apart in the log.
    pub fn finish(mut self, termination: &Termination) {
        match termination {
            Termination::Interrupted { ticks } => info!("Stopped by user after {ticks} readings"),
            Termination::Completed { ticks } => info!("Finished after {ticks} readings"),
            Termination::Failed { ticks, error } => {
                error!("Stopped after {ticks} readings: {error}")
            }
        }

        self.source.release();
        if self.config.shutdown_action == ShutdownAction::RemoveFile {
            if let Err(err) = self.publisher.remove() {
                error!("{err}");
            }
        }
        info!("done");
    }
}
