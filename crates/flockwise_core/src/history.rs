use flockwise_data::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// Append-only, step-ordered record of per-step statistics.
///
/// Entries are never removed or edited.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StatsHistory {
    snapshots: Vec<StatsSnapshot>,
}

impl StatsHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot and returns a reference to it.
    pub fn push(&mut self, snapshot: StatsSnapshot) -> &StatsSnapshot {
        self.snapshots.push(snapshot);
        let last = self.snapshots.len() - 1;
        &self.snapshots[last]
    }

    #[must_use]
    pub fn latest(&self) -> Option<&StatsSnapshot> {
        self.snapshots.last()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[StatsSnapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatsSnapshot> {
        self.snapshots.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Mean of `metric` over all recorded steps, 0.0 when empty.
    pub fn mean_of<F>(&self, metric: F) -> f64
    where
        F: Fn(&StatsSnapshot) -> f64,
    {
        if self.snapshots.is_empty() {
            return 0.0;
        }
        self.snapshots.iter().map(metric).sum::<f64>() / self.snapshots.len() as f64
    }
}

impl<'a> IntoIterator for &'a StatsHistory {
    type Item = &'a StatsSnapshot;
    type IntoIter = std::slice::Iter<'a, StatsSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
