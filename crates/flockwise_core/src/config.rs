//! Configuration management for simulation parameters.
//!
//! A `FlockConfig` is an immutable value handed to each flock at
//! construction. Nothing in the engine reads global or shared settings, so
//! any number of differently configured flocks can run side by side.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. A TOML file (overrides defaults section by section)
//!
//! ## Example `flock.toml`
//!
//! ```toml
//! [world]
//! width = 1000.0
//! height = 600.0
//! agent_count = 100
//! seed = 42
//!
//! [agent]
//! max_speed = 40.0
//! perception_radius = 80.0
//! k_nearest = 6
//!
//! [rules]
//! separation_min_distance = 20.0
//! cluster_distance = 40.0
//! speed_limit = "magnitude"
//!
//! [policy]
//! variant = "three_state"
//! thresholds = [1, 3]
//! isolated = [0.0, 0.0, 0.0, 1.0]
//! peripheral = [0.3, 0.4, 0.3, 0.0]
//! central = [0.5, 0.1, 0.4, 0.0]
//! ```

use crate::error::{FlockError, Result};
use flockwise_data::{ConnectivityState, Vec2, WeightVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World dimensions, population and spawn layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub agent_count: usize,
    pub seed: u64,
    /// Horizontal spawn band as fractions of `width`.
    pub spawn_x: [f64; 2],
    /// Vertical spawn band as fractions of `height`.
    pub spawn_y: [f64; 2],
    /// Shared starting direction; each agent adds its own per-axis noise.
    pub initial_heading: Vec2,
    /// Starting connectivity state; `None` means the policy's top state.
    pub initial_state: Option<ConnectivityState>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            agent_count: 100,
            seed: 0,
            spawn_x: [0.3, 0.7],
            spawn_y: [1.0 / 6.0, 5.0 / 6.0],
            initial_heading: Vec2::new(0.0, 1.0),
            initial_state: None,
        }
    }
}

/// Per-agent tunables applied to every spawned agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    pub max_speed: f64,
    pub perception_radius: f64,
    pub noise_amplitude: f64,
    pub k_nearest: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_speed: 40.0,
            perception_radius: 80.0,
            noise_amplitude: 0.1,
            k_nearest: 6,
        }
    }
}

/// How the final velocity is bounded by `max_speed`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedLimit {
    /// Rescale `|v|` down to `max_speed`, keeping the direction.
    #[default]
    Magnitude,
    /// `min(v_i, max_speed)` on each axis. Upper clamp only; the speed
    /// itself may exceed `max_speed`.
    Componentwise,
}

/// Multiplier applied to the uniform `[-1, 1]` randomness draw.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RandomnessScale {
    #[default]
    Unit,
    MaxSpeed,
}

/// Steering rule and statistics parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    /// Repulsion range and width of the border freeze zone.
    pub separation_min_distance: f64,
    /// Two agents closer than this share a cluster.
    pub cluster_distance: f64,
    pub speed_limit: SpeedLimit,
    pub randomness_scale: RandomnessScale,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            separation_min_distance: 20.0,
            cluster_distance: 20.0,
            speed_limit: SpeedLimit::Magnitude,
            randomness_scale: RandomnessScale::Unit,
        }
    }
}

/// Neighbor-count thresholds and the weight vector selected per state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PolicyConfig {
    TwoState {
        threshold: i64,
        isolated: WeightVector,
        connected: WeightVector,
    },
    ThreeState {
        thresholds: [i64; 2],
        isolated: WeightVector,
        peripheral: WeightVector,
        central: WeightVector,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::TwoState {
            threshold: 3,
            isolated: WeightVector::new(0.0, 0.0, 0.0, 1.0),
            connected: WeightVector::new(0.5, 0.1, 0.4, 0.0),
        }
    }
}

impl PolicyConfig {
    /// Default three-state mapping: `isolated` below one neighbor,
    /// `central` from three neighbors on.
    #[must_use]
    pub fn three_state_default() -> Self {
        Self::ThreeState {
            thresholds: [1, 3],
            isolated: WeightVector::new(0.0, 0.0, 0.0, 1.0),
            peripheral: WeightVector::new(0.3, 0.4, 0.3, 0.0),
            central: WeightVector::new(0.5, 0.1, 0.4, 0.0),
        }
    }

    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::TwoState { .. } => "two_state",
            Self::ThreeState { .. } => "three_state",
        }
    }

    /// States this variant can produce, in column order.
    #[must_use]
    pub fn states(&self) -> &'static [ConnectivityState] {
        match self {
            Self::TwoState { .. } => &[ConnectivityState::Isolated, ConnectivityState::Connected],
            Self::ThreeState { .. } => &[
                ConnectivityState::Isolated,
                ConnectivityState::Peripheral,
                ConnectivityState::Connected,
            ],
        }
    }

    /// Replaces the social weights of the top state, keeping its randomness weight.
    pub fn set_social_weights(&mut self, alignment: f64, cohesion: f64, separation: f64) {
        match self {
            Self::TwoState { connected, .. } => {
                *connected = connected.with_social(alignment, cohesion, separation);
            }
            Self::ThreeState { central, .. } => {
                *central = central.with_social(alignment, cohesion, separation);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::TwoState {
                threshold,
                isolated,
                connected,
            } => {
                if *threshold < 0 {
                    return Err(FlockError::NegativeThreshold(*threshold));
                }
                ensure_weights(ConnectivityState::Isolated, isolated)?;
                ensure_weights(ConnectivityState::Connected, connected)?;
            }
            Self::ThreeState {
                thresholds: [low, high],
                isolated,
                peripheral,
                central,
            } => {
                for t in [*low, *high] {
                    if t < 0 {
                        return Err(FlockError::NegativeThreshold(t));
                    }
                }
                if low >= high {
                    return Err(FlockError::UnorderedThresholds {
                        low: *low,
                        high: *high,
                    });
                }
                ensure_weights(ConnectivityState::Isolated, isolated)?;
                ensure_weights(ConnectivityState::Peripheral, peripheral)?;
                ensure_weights(ConnectivityState::Connected, central)?;
            }
        }
        Ok(())
    }
}

fn ensure_weights(state: ConnectivityState, weights: &WeightVector) -> Result<()> {
    if weights.is_finite() {
        Ok(())
    } else {
        Err(FlockError::InvalidWeights(state))
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlockError::NonPositive { field, value })
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FlockError::Negative { field, value })
    }
}

fn ensure_spawn_range(field: &'static str, [low, high]: [f64; 2]) -> Result<()> {
    if (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low < high {
        Ok(())
    } else {
        Err(FlockError::InvalidSpawnRange { field, low, high })
    }
}

/// Complete, immutable configuration of one flock.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct FlockConfig {
    pub world: WorldConfig,
    pub agent: AgentConfig,
    pub rules: RuleConfig,
    pub policy: PolicyConfig,
}

impl FlockConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violation found. Values are never clamped into
    /// range.
    pub fn validate(&self) -> Result<()> {
        if self.world.agent_count == 0 {
            return Err(FlockError::InvalidAgentCount(self.world.agent_count));
        }
        ensure_positive("world.width", self.world.width)?;
        ensure_positive("world.height", self.world.height)?;
        ensure_spawn_range("world.spawn_x", self.world.spawn_x)?;
        ensure_spawn_range("world.spawn_y", self.world.spawn_y)?;
        let heading = self.world.initial_heading;
        if !heading.is_finite() {
            return Err(FlockError::InvalidHeading {
                x: heading.x,
                y: heading.y,
            });
        }

        ensure_positive("agent.max_speed", self.agent.max_speed)?;
        ensure_positive("agent.perception_radius", self.agent.perception_radius)?;
        ensure_non_negative("agent.noise_amplitude", self.agent.noise_amplitude)?;
        if self.agent.k_nearest == 0 {
            return Err(FlockError::ZeroNeighborLimit);
        }

        ensure_positive(
            "rules.separation_min_distance",
            self.rules.separation_min_distance,
        )?;
        ensure_positive("rules.cluster_distance", self.rules.cluster_distance)?;

        self.policy.validate()?;
        if let Some(state) = self.world.initial_state {
            self.ensure_state_in_policy(state)?;
        }

        if self.agent.k_nearest >= self.world.agent_count {
            tracing::warn!(
                k_nearest = self.agent.k_nearest,
                agent_count = self.world.agent_count,
                "k_nearest is not smaller than the population; neighbor lists are radius-bound only"
            );
        }
        Ok(())
    }

    pub(crate) fn ensure_state_in_policy(&self, state: ConnectivityState) -> Result<()> {
        if self.policy.states().contains(&state) {
            Ok(())
        } else {
            Err(FlockError::StateNotInPolicy {
                state,
                variant: self.policy.variant_name(),
            })
        }
    }

    /// State every spawned agent starts in.
    #[must_use]
    pub fn initial_state(&self) -> ConnectivityState {
        self.world
            .initial_state
            .unwrap_or(ConnectivityState::Connected)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.agent).as_bytes());
        hasher.update(format!("{:?}", self.rules).as_bytes());
        hasher.update(format!("{:?}", self.policy).as_bytes());
        hex::encode(hasher.finalize())
    }
}
