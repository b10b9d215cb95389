//! Per-step simulation systems.
//!
//! `steering` computes new velocities from a frozen view of the flock,
//! `movement` bounds and integrates them, and `stats` summarises the
//! finished step.

pub mod movement;
pub mod stats;
pub mod steering;
