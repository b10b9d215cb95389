//! Parameter sweep over neighbor count and social rule weights.
//!
//! Every combination gets its own freshly constructed flock, so runs share
//! nothing but the base configuration and (optionally) a starting layout.
//! Runs execute on the rayon pool; results come back in plan order.

use anyhow::{bail, Context, Result};
use flockwise_core::{Flock, FlockConfig};
use flockwise_data::AgentState;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const SWEEP_COLUMNS: [&str; 10] = [
    "k",
    "alignment",
    "cohesion",
    "separation",
    "fingerprint",
    "mean_polarization",
    "mean_angular_variance",
    "mean_kinetic_energy",
    "final_clusters",
    "steps",
];

#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub base: FlockConfig,
    pub seed_agents: Option<Vec<AgentState>>,
    pub k_values: Vec<usize>,
    /// Social weights `[alignment, cohesion, separation]` for the top state.
    pub weight_grid: Vec<[f64; 3]>,
    pub steps: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub k: usize,
    pub weights: [f64; 3],
    pub fingerprint: String,
    pub mean_polarization: f64,
    pub mean_angular_variance: f64,
    pub mean_kinetic_energy: f64,
    pub final_clusters: usize,
    pub steps: u64,
}

impl SweepResult {
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.k.to_string(),
            self.weights[0].to_string(),
            self.weights[1].to_string(),
            self.weights[2].to_string(),
            self.fingerprint.clone(),
            self.mean_polarization.to_string(),
            self.mean_angular_variance.to_string(),
            self.mean_kinetic_energy.to_string(),
            self.final_clusters.to_string(),
            self.steps.to_string(),
        ]
    }
}

impl SweepPlan {
    #[must_use]
    pub fn new(base: FlockConfig, steps: u64) -> Self {
        let k = base.agent.k_nearest;
        Self {
            base,
            seed_agents: None,
            k_values: vec![k],
            weight_grid: Vec::new(),
            steps,
        }
    }

    #[must_use]
    pub fn with_k_values(mut self, k_values: Vec<usize>) -> Self {
        self.k_values = k_values;
        self
    }

    #[must_use]
    pub fn with_weight_grid(mut self, grid: Vec<[f64; 3]>) -> Self {
        self.weight_grid = grid;
        self
    }

    /// Starts every run from the same explicit layout instead of a spawn.
    #[must_use]
    pub fn with_seed_agents(mut self, agents: Vec<AgentState>) -> Self {
        self.seed_agents = Some(agents);
        self
    }

    /// Every `(a, c, s)` triple drawn from `values`.
    #[must_use]
    pub fn weight_cube(values: &[f64]) -> Vec<[f64; 3]> {
        let mut grid = Vec::with_capacity(values.len().pow(3));
        for &a in values {
            for &c in values {
                for &s in values {
                    grid.push([a, c, s]);
                }
            }
        }
        grid
    }

    /// `(k, weights)` pairs, k-major.
    #[must_use]
    pub fn combinations(&self) -> Vec<(usize, [f64; 3])> {
        self.k_values
            .iter()
            .flat_map(|&k| self.weight_grid.iter().map(move |&w| (k, w)))
            .collect()
    }

    /// Configuration used for one combination.
    #[must_use]
    pub fn config_for(&self, k: usize, weights: [f64; 3]) -> FlockConfig {
        let mut config = self.base.clone();
        config.agent.k_nearest = k;
        config
            .policy
            .set_social_weights(weights[0], weights[1], weights[2]);
        config
    }

    pub fn run(&self) -> Result<Vec<SweepResult>> {
        let combinations = self.combinations();
        if combinations.is_empty() {
            bail!("sweep has no combinations; supply k values and a weight grid");
        }
        tracing::info!(
            runs = combinations.len(),
            steps = self.steps,
            "Parameter sweep started"
        );

        let results = combinations
            .par_iter()
            .map(|&(k, weights)| self.run_one(k, weights))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(runs = results.len(), "Parameter sweep finished");
        Ok(results)
    }

    fn run_one(&self, k: usize, weights: [f64; 3]) -> Result<SweepResult> {
        let config = self.config_for(k, weights);
        let fingerprint = config.fingerprint();
        let mut flock = match &self.seed_agents {
            Some(agents) => Flock::from_states(config, agents.clone()),
            None => Flock::new(config),
        }
        .with_context(|| format!("sweep run k={k} weights={weights:?}"))?;
        flock.advance(self.steps);

        let history = flock.history();
        Ok(SweepResult {
            k,
            weights,
            fingerprint,
            mean_polarization: history.mean_of(|s| s.polarization),
            mean_angular_variance: history.mean_of(|s| s.angular_variance),
            mean_kinetic_energy: history.mean_of(|s| s.kinetic_energy),
            final_clusters: history.latest().map_or(0, |s| s.cluster_count),
            steps: self.steps,
        })
    }
}

pub fn write_sweep_csv(path: impl AsRef<Path>, results: &[SweepResult]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    flockwise_io::write_table(
        BufWriter::new(file),
        &SWEEP_COLUMNS,
        results.iter().map(SweepResult::to_row),
    )?;
    tracing::info!(path = %path.display(), rows = results.len(), "Sweep exported");
    Ok(())
}
