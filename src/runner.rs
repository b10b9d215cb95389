//! Headless simulation driver.

use anyhow::{Context, Result};
use chrono::Utc;
use flockwise_core::{Flock, FlockConfig, FlockObserver, RunSeed, StatsHistory};
use flockwise_io::StatsCsvWriter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// What a finished headless run reports back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub fingerprint: String,
    pub agents: usize,
    pub steps: u64,
    pub final_clusters: usize,
    pub mean_polarization: f64,
    pub mean_step_us: u64,
}

/// Drives one flock for a fixed number of steps, optionally streaming each
/// step's statistics row to a CSV file and notifying observers.
pub struct HeadlessRun<'a> {
    flock: Flock,
    csv: Option<StatsCsvWriter<BufWriter<File>>>,
    observers: Vec<Box<dyn FlockObserver + 'a>>,
}

impl<'a> HeadlessRun<'a> {
    pub fn new(config: FlockConfig) -> Result<Self> {
        let flock = Flock::new(config).context("invalid flock configuration")?;
        Ok(Self::from_flock(flock))
    }

    pub fn from_seed(seed: &RunSeed) -> Result<Self> {
        let flock = seed.build().context("run seed does not describe a valid flock")?;
        Ok(Self::from_flock(flock))
    }

    #[must_use]
    pub fn from_flock(flock: Flock) -> Self {
        Self {
            flock,
            csv: None,
            observers: Vec::new(),
        }
    }

    /// Streams one row per step to `path`; the header is written now.
    pub fn with_csv(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let labels = self.flock.state_labels();
        self.csv = Some(StatsCsvWriter::new(BufWriter::new(file), &labels)?);
        Ok(self)
    }

    #[must_use]
    pub fn observe(mut self, observer: impl FlockObserver + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    #[must_use]
    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    /// Runs `steps` ticks and hands back the flock with a summary.
    pub fn run(mut self, steps: u64) -> Result<(Flock, RunSummary)> {
        let started_at = Utc::now().to_rfc3339();
        tracing::info!(
            steps,
            agents = self.flock.agents().len(),
            fingerprint = %self.flock.config().fingerprint(),
            "Headless run started"
        );

        for _ in 0..steps {
            let stats = self.flock.step().clone();
            if let Some(csv) = self.csv.as_mut() {
                csv.write_snapshot(&stats)?;
            }
            if !self.observers.is_empty() {
                let snapshot = self.flock.snapshot();
                for observer in &mut self.observers {
                    observer.observe(&snapshot, &stats);
                }
            }
        }

        if let Some(csv) = self.csv.take() {
            csv.finish()?;
        }

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now().to_rfc3339(),
            fingerprint: self.flock.config().fingerprint(),
            agents: self.flock.agents().len(),
            steps: self.flock.step_count(),
            final_clusters: self
                .flock
                .latest_stats()
                .map_or(0, |s| s.cluster_count),
            mean_polarization: self.flock.history().mean_of(|s| s.polarization),
            mean_step_us: self.flock.metrics().mean_duration().as_micros() as u64,
        };
        tracing::info!(
            steps = summary.steps,
            clusters = summary.final_clusters,
            mean_step_us = summary.mean_step_us,
            "Headless run finished"
        );
        Ok((self.flock, summary))
    }
}

/// Builds a fresh flock from `config`, runs it for `steps` ticks while
/// notifying `observer`, and returns the recorded statistics.
pub fn run<'a>(
    config: FlockConfig,
    steps: u64,
    observer: impl FlockObserver + 'a,
) -> Result<StatsHistory> {
    let (flock, _) = HeadlessRun::new(config)?.observe(observer).run(steps)?;
    Ok(flock.history().clone())
}
