//! Step timing and logging bootstrap.

use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Per-flock step counter and timing summary.
#[derive(Debug, Clone)]
pub struct StepMetrics {
    steps: u64,
    last_duration: Duration,
    total_duration: Duration,
    log_interval: u64,
}

impl Default for StepMetrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl StepMetrics {
    /// Creates a collector that logs every `log_interval` steps (0 disables).
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            steps: 0,
            last_duration: Duration::ZERO,
            total_duration: Duration::ZERO,
            log_interval,
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&mut self, duration: Duration, agents: usize, clusters: usize) {
        self.steps += 1;
        self.last_duration = duration;
        self.total_duration += duration;

        if self.log_interval > 0 && self.steps % self.log_interval == 0 {
            tracing::info!(
                step = self.steps,
                agents = agents,
                clusters = clusters,
                mean_step_us = self.mean_duration().as_micros() as u64,
                "Simulation step"
            );
        }
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn last_duration(&self) -> Duration {
        self.last_duration
    }

    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    #[must_use]
    pub fn mean_duration(&self) -> Duration {
        if self.steps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos((self.total_duration.as_nanos() / u128::from(self.steps)) as u64)
        }
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
