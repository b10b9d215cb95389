//! The simulation engine.
//!
//! A [`Flock`] owns its agents, its random stream and its statistics
//! history. Each call to [`Flock::step`] runs one barrier-synchronised tick:
//!
//! 1. neighbor discovery from start-of-step positions
//! 2. velocity synthesis for every agent against that frozen state
//! 3. position integration with toroidal wrap
//! 4. connectivity re-classification, effective from the next step
//! 5. statistics aggregation
//!
//! Nothing is written back to an agent until every new velocity exists.

use crate::agent::Agent;
use crate::config::FlockConfig;
use crate::error::{FlockError, Result};
use crate::history::StatsHistory;
use crate::metrics::StepMetrics;
use crate::neighbors::NeighborIndex;
use crate::policy::AdaptiveWeightPolicy;
use crate::snapshot::{AgentView, FlockSnapshot};
use crate::systems::movement;
use crate::systems::stats::{self, StatsContext};
use crate::systems::steering::{self, SteeringContext};
use flockwise_data::{AgentState, StatsSnapshot, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// ChaCha stream used for per-step noise; stream 0 is reserved for spawning.
const STEP_STREAM: u64 = 1;

/// Draws the initial agent layout described by `config`.
///
/// Positions are uniform in the spawn band, velocities are the shared
/// heading plus per-axis noise in `[-noise_amplitude, noise_amplitude)`.
pub fn spawn_states<R: Rng>(config: &FlockConfig, rng: &mut R) -> Vec<AgentState> {
    let world = &config.world;
    let agent = &config.agent;
    let [x0, x1] = world.spawn_x;
    let [y0, y1] = world.spawn_y;
    let state = config.initial_state();

    (0..world.agent_count)
        .map(|_| {
            let x = rng.gen_range(x0 * world.width..x1 * world.width);
            let y = rng.gen_range(y0 * world.height..y1 * world.height);
            let jitter = Vec2::new(
                (rng.gen::<f64>() * 2.0 - 1.0) * agent.noise_amplitude,
                (rng.gen::<f64>() * 2.0 - 1.0) * agent.noise_amplitude,
            );
            AgentState {
                position: Vec2::new(x, y),
                velocity: world.initial_heading + jitter,
                max_speed: agent.max_speed,
                perception_radius: agent.perception_radius,
                noise_amplitude: agent.noise_amplitude,
                state,
            }
        })
        .collect()
}

fn validate_state(config: &FlockConfig, index: usize, state: &AgentState) -> Result<()> {
    let p = state.position;
    let inside = p.is_finite()
        && (0.0..config.world.width).contains(&p.x)
        && (0.0..config.world.height).contains(&p.y);
    if !inside {
        return Err(FlockError::InvalidCoordinate {
            index,
            x: p.x,
            y: p.y,
        });
    }
    if !state.velocity.is_finite() {
        return Err(FlockError::InvalidVelocity {
            index,
            x: state.velocity.x,
            y: state.velocity.y,
        });
    }
    for (field, value, positive) in [
        ("max_speed", state.max_speed, true),
        ("perception_radius", state.perception_radius, true),
        ("noise_amplitude", state.noise_amplitude, false),
    ] {
        let ok = value.is_finite() && if positive { value > 0.0 } else { value >= 0.0 };
        if !ok {
            return Err(FlockError::InvalidAgentParameter {
                index,
                field,
                value,
            });
        }
    }
    config.ensure_state_in_policy(state.state)
}

pub struct Flock {
    config: FlockConfig,
    policy: AdaptiveWeightPolicy,
    agents: Vec<Agent>,
    initial: Vec<AgentState>,
    history: StatsHistory,
    index: NeighborIndex,
    rng: ChaCha8Rng,
    step: u64,
    metrics: StepMetrics,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
}

impl Flock {
    /// Validates `config` and spawns a seeded random layout.
    pub fn new(config: FlockConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let states = spawn_states(&config, &mut rng);
        Self::build(config, states)
    }

    /// Rebuilds a flock from an explicit initial layout.
    ///
    /// Same config and same states always produce the same trajectory.
    pub fn from_states(config: FlockConfig, states: Vec<AgentState>) -> Result<Self> {
        config.validate()?;
        if states.len() != config.world.agent_count {
            return Err(FlockError::AgentCountMismatch {
                expected: config.world.agent_count,
                actual: states.len(),
            });
        }
        for (i, state) in states.iter().enumerate() {
            validate_state(&config, i, state)?;
        }
        Self::build(config, states)
    }

    fn build(config: FlockConfig, states: Vec<AgentState>) -> Result<Self> {
        let policy = AdaptiveWeightPolicy::from_config(&config.policy)?;
        let agents: Vec<Agent> = states
            .iter()
            .enumerate()
            .map(|(i, s)| Agent::from_state(i, s, &policy))
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        rng.set_stream(STEP_STREAM);

        tracing::info!(
            agents = agents.len(),
            width = config.world.width,
            height = config.world.height,
            seed = config.world.seed,
            policy = config.policy.variant_name(),
            "Flock constructed"
        );

        let n = agents.len();
        Ok(Self {
            config,
            policy,
            agents,
            initial: states,
            history: StatsHistory::new(),
            index: NeighborIndex::new(),
            rng,
            step: 0,
            metrics: StepMetrics::default(),
            positions: Vec::with_capacity(n),
            velocities: Vec::with_capacity(n),
        })
    }

    /// Advances the simulation by exactly one tick and returns its statistics.
    pub fn step(&mut self) -> &StatsSnapshot {
        let started = Instant::now();
        let k = self.config.agent.k_nearest;

        self.positions.clear();
        self.positions
            .extend(self.agents.iter().map(|a| a.position));
        for (i, agent) in self.agents.iter_mut().enumerate() {
            self.index.neighbors_into(
                i,
                &self.positions,
                agent.perception_radius,
                k,
                &mut agent.neighbors,
            );
        }

        let ctx = SteeringContext::from_config(&self.config);
        self.velocities.clear();
        for agent in &self.agents {
            let v = steering::synthesize_velocity(agent, &self.agents, &ctx, &mut self.rng);
            self.velocities.push(v);
        }

        let (width, height) = (self.config.world.width, self.config.world.height);
        for (agent, &velocity) in self.agents.iter_mut().zip(&self.velocities) {
            agent.velocity = velocity;
            agent.position = movement::integrate(agent.position, velocity, width, height);
            let (state, weights) = self.policy.select(agent.neighbors.len());
            agent.state = state;
            agent.weights = weights;
        }
        self.step += 1;

        let snapshot = stats::compute_snapshot(&StatsContext {
            agents: &self.agents,
            policy: &self.policy,
            cluster_distance: self.config.rules.cluster_distance,
            step: self.step,
        });
        self.metrics
            .record_step(started.elapsed(), self.agents.len(), snapshot.cluster_count);
        tracing::debug!(
            step = self.step,
            cohesion = snapshot.cohesion,
            alignment_variance = snapshot.alignment_variance,
            clusters = snapshot.cluster_count,
            "Step complete"
        );
        self.history.push(snapshot)
    }

    /// Runs `steps` ticks back to back.
    pub fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    #[must_use]
    pub fn policy(&self) -> &AdaptiveWeightPolicy {
        &self.policy
    }

    #[must_use]
    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    #[must_use]
    pub fn latest_stats(&self) -> Option<&StatsSnapshot> {
        self.history.latest()
    }

    /// Number of completed steps.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step
    }

    #[must_use]
    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// Layout this flock started from.
    #[must_use]
    pub fn initial_states(&self) -> &[AgentState] {
        &self.initial
    }

    /// Current agent states, usable as the start of a new run.
    #[must_use]
    pub fn current_states(&self) -> Vec<AgentState> {
        self.agents.iter().map(Agent::to_state).collect()
    }

    /// Export column names for the connectivity tally.
    #[must_use]
    pub fn state_labels(&self) -> Vec<&'static str> {
        self.policy.state_labels()
    }

    /// Detached copy of the current agent state for renderers.
    #[must_use]
    pub fn snapshot(&self) -> FlockSnapshot {
        FlockSnapshot {
            step: self.step,
            width: self.config.world.width,
            height: self.config.world.height,
            agents: self
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id,
                    position: a.position,
                    velocity: a.velocity,
                    state: a.state,
                    neighbor_count: a.neighbors.len(),
                })
                .collect(),
        }
    }
}
