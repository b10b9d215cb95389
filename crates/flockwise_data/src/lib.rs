//! Core data structures for the Flockwise simulation.
//!
//! Everything here is plain, serializable state. Behavior lives in
//! `flockwise_core`; this crate only knows how to add vectors.

pub mod agent;
pub mod stats;
pub mod vector;

pub use agent::{AgentState, ConnectivityState, WeightVector};
pub use stats::{StateCounts, StatsSnapshot};
pub use vector::Vec2;
