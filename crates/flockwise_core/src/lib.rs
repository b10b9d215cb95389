//! # Flockwise Core
//!
//! The flocking simulation engine.
//!
//! This crate contains the deterministic per-step logic:
//! - k-nearest neighbor discovery within a perception radius
//! - Alignment, cohesion and separation steering with noise
//! - Toroidal position integration and speed limiting
//! - Connectivity-driven rule weighting
//! - Per-step statistics including cluster counting
//!
//! ## Architecture
//!
//! A [`Flock`] is built from an immutable [`FlockConfig`] and advanced one
//! tick at a time by an external driver. Within a tick every agent reads
//! the same frozen pre-step state; writes happen only after all new
//! velocities exist. Each flock owns a seeded ChaCha RNG, so identical
//! config and initial layout give identical trajectories.
//!
//! ## Example
//!
//! ```
//! use flockwise_core::{Flock, FlockConfig};
//!
//! let mut config = FlockConfig::default();
//! config.world.agent_count = 30;
//! config.world.seed = 42;
//!
//! let mut flock = Flock::new(config).unwrap();
//! let stats = flock.step();
//! assert_eq!(stats.step, 1);
//! assert_eq!(flock.agents().len(), 30);
//! ```

/// Agent entity owned by the flock
pub mod agent;
/// Configuration management for simulation parameters
pub mod config;
/// Construction error types
pub mod error;
/// The step engine
pub mod flock;
/// Append-only statistics history
pub mod history;
/// Step timing and logging setup
pub mod metrics;
/// k-nearest neighbor discovery
pub mod neighbors;
/// Connectivity classification and weight selection
pub mod policy;
/// Serializable run seeds for deterministic replays
pub mod seed;
/// Read-only views for renderers and other observers
pub mod snapshot;
/// Steering, movement and statistics systems
pub mod systems;

pub use agent::Agent;
pub use config::{
    AgentConfig, FlockConfig, PolicyConfig, RandomnessScale, RuleConfig, SpeedLimit, WorldConfig,
};
pub use error::{FlockError, Result};
pub use flock::{spawn_states, Flock};
pub use history::StatsHistory;
pub use metrics::{init_logging, StepMetrics};
pub use neighbors::{find_neighbors, NeighborIndex};
pub use policy::AdaptiveWeightPolicy;
pub use seed::RunSeed;
pub use snapshot::{AgentView, FlockObserver, FlockSnapshot};
pub use flockwise_data::{AgentState, ConnectivityState, StatsSnapshot, Vec2, WeightVector};
