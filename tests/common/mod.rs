#[macro_use]
pub mod macros;

use flockwise_core::{Flock, FlockConfig, PolicyConfig};
use flockwise_data::{AgentState, ConnectivityState, Vec2, WeightVector};

struct PendingAgent {
    position: Vec2,
    velocity: Vec2,
    state: Option<ConnectivityState>,
}

/// Builds flocks with hand-placed agents for scenario tests.
///
/// With no agents added, `build` spawns from the configuration instead.
#[allow(dead_code)]
pub struct FlockBuilder {
    config: FlockConfig,
    agents: Vec<PendingAgent>,
}

#[allow(dead_code)]
impl FlockBuilder {
    pub fn new() -> Self {
        Self {
            config: FlockConfig::default(),
            agents: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = seed;
        self
    }

    pub fn with_world(mut self, width: f64, height: f64) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut FlockConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// No per-axis noise and no randomness in any weight vector.
    pub fn noiseless(mut self) -> Self {
        self.config.agent.noise_amplitude = 0.0;
        self.config.policy = match self.config.policy {
            PolicyConfig::TwoState {
                threshold,
                isolated,
                connected,
            } => PolicyConfig::TwoState {
                threshold,
                isolated: without_randomness(isolated),
                connected: without_randomness(connected),
            },
            PolicyConfig::ThreeState {
                thresholds,
                isolated,
                peripheral,
                central,
            } => PolicyConfig::ThreeState {
                thresholds,
                isolated: without_randomness(isolated),
                peripheral: without_randomness(peripheral),
                central: without_randomness(central),
            },
        };
        self
    }

    /// Every agent starts isolated and isolated agents do not move.
    pub fn frozen_isolated(mut self, threshold: i64) -> Self {
        self.config.agent.noise_amplitude = 0.0;
        self.config.world.initial_state = Some(ConnectivityState::Isolated);
        self.config.policy = PolicyConfig::TwoState {
            threshold,
            isolated: WeightVector::new(0.0, 0.0, 0.0, 0.0),
            connected: WeightVector::new(0.5, 0.1, 0.4, 0.0),
        };
        self
    }

    pub fn with_agent(mut self, x: f64, y: f64, vx: f64, vy: f64) -> Self {
        self.agents.push(PendingAgent {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            state: None,
        });
        self
    }

    pub fn with_agent_in(
        mut self,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        state: ConnectivityState,
    ) -> Self {
        self.agents.push(PendingAgent {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            state: Some(state),
        });
        self
    }

    pub fn config(&self) -> FlockConfig {
        let mut config = self.config.clone();
        if !self.agents.is_empty() {
            config.world.agent_count = self.agents.len();
        }
        config
    }

    pub fn states(&self) -> Vec<AgentState> {
        let config = self.config();
        self.agents
            .iter()
            .map(|a| AgentState {
                position: a.position,
                velocity: a.velocity,
                max_speed: config.agent.max_speed,
                perception_radius: config.agent.perception_radius,
                noise_amplitude: config.agent.noise_amplitude,
                state: a.state.unwrap_or_else(|| config.initial_state()),
            })
            .collect()
    }

    pub fn build(self) -> Flock {
        let config = self.config();
        if self.agents.is_empty() {
            Flock::new(config).expect("Failed to spawn flock in test builder")
        } else {
            Flock::from_states(config, self.states())
                .expect("Failed to build flock in test builder")
        }
    }
}

fn without_randomness(w: WeightVector) -> WeightVector {
    WeightVector::new(w.alignment(), w.cohesion(), w.separation(), 0.0)
}
