use flockwise_data::{ConnectivityState, StatsSnapshot, Vec2};
use serde::{Deserialize, Serialize};

/// Read-only view of one agent after a completed step.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub state: ConnectivityState,
    pub neighbor_count: usize,
}

/// Everything a renderer needs to draw the flock, detached from the engine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FlockSnapshot {
    pub step: u64,
    pub width: f64,
    pub height: f64,
    pub agents: Vec<AgentView>,
}

impl FlockSnapshot {
    /// Mean velocity of the flock, the "average direction" arrow.
    #[must_use]
    pub fn mean_velocity(&self) -> Vec2 {
        Vec2::mean(self.agents.iter().map(|a| a.velocity)).unwrap_or(Vec2::ZERO)
    }
}

/// Receives each completed step. Observers only ever see copies.
pub trait FlockObserver {
    fn observe(&mut self, snapshot: &FlockSnapshot, stats: &StatsSnapshot);
}

impl<F> FlockObserver for F
where
    F: FnMut(&FlockSnapshot, &StatsSnapshot),
{
    fn observe(&mut self, snapshot: &FlockSnapshot, stats: &StatsSnapshot) {
        (*self)(snapshot, stats)
    }
}
