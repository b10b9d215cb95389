use crate::policy::AdaptiveWeightPolicy;
use flockwise_data::{AgentState, ConnectivityState, Vec2, WeightVector};

/// One simulated bird.
///
/// `neighbors` holds indices into the owning flock's agent list. It is
/// rebuilt from scratch at the start of every step.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_speed: f64,
    pub perception_radius: f64,
    pub noise_amplitude: f64,
    pub weights: WeightVector,
    pub state: ConnectivityState,
    pub neighbors: Vec<usize>,
}

impl Agent {
    #[must_use]
    pub fn from_state(id: usize, state: &AgentState, policy: &AdaptiveWeightPolicy) -> Self {
        Self {
            id,
            position: state.position,
            velocity: state.velocity,
            max_speed: state.max_speed,
            perception_radius: state.perception_radius,
            noise_amplitude: state.noise_amplitude,
            weights: policy.weights(state.state),
            state: state.state,
            neighbors: Vec::new(),
        }
    }

    #[must_use]
    pub fn to_state(&self) -> AgentState {
        AgentState {
            position: self.position,
            velocity: self.velocity,
            max_speed: self.max_speed,
            perception_radius: self.perception_radius,
            noise_amplitude: self.noise_amplitude,
            state: self.state,
        }
    }

    #[must_use]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }
}
