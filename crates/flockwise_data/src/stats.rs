use crate::agent::ConnectivityState;
use crate::vector::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Leading columns of the per-step tabular export, in contract order.
pub const TABULAR_COLUMNS: [&str; 4] = ["cohesion", "separation", "alignment_variance", "clusters"];

/// Number of agents per connectivity state, ordered by state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateCounts(pub BTreeMap<ConnectivityState, usize>);

impl StateCounts {
    /// Zeroed tally over the given states.
    pub fn zeroed<I>(states: I) -> Self
    where
        I: IntoIterator<Item = ConnectivityState>,
    {
        Self(states.into_iter().map(|s| (s, 0)).collect())
    }

    pub fn record(&mut self, state: ConnectivityState) {
        *self.0.entry(state).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, state: ConnectivityState) -> usize {
        self.0.get(&state).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConnectivityState, usize)> + '_ {
        self.0.iter().map(|(s, c)| (*s, *c))
    }
}

/// Summary metrics of one completed step. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub step: u64,
    /// Sum of squared distances to the mean position.
    pub cohesion: f64,
    /// Reciprocal of `cohesion`; `None` when every agent shares one position.
    pub cohesion_inverse: Option<f64>,
    /// Mean over agents of the mean distance to their own neighbors.
    pub separation: f64,
    /// Sum of squared deviations from the flock-mean velocity.
    pub alignment_variance: f64,
    pub cluster_count: usize,
    pub state_counts: StateCounts,
    pub polarization: f64,
    pub angular_variance: f64,
    pub kinetic_energy: f64,
    pub mean_neighbor_count: f64,
    pub mean_velocity: Vec2,
}

impl StatsSnapshot {
    /// Header row: the fixed columns followed by one column per state label.
    #[must_use]
    pub fn tabular_header(state_labels: &[&str]) -> Vec<String> {
        TABULAR_COLUMNS
            .iter()
            .chain(state_labels.iter())
            .map(|c| (*c).to_string())
            .collect()
    }

    /// Row values in the same order as [`StatsSnapshot::tabular_header`].
    #[must_use]
    pub fn tabular_row(&self) -> Vec<String> {
        let mut row = vec![
            self.cohesion.to_string(),
            self.separation.to_string(),
            self.alignment_variance.to_string(),
            self.cluster_count.to_string(),
        ];
        row.extend(self.state_counts.iter().map(|(_, c)| c.to_string()));
        row
    }
}
