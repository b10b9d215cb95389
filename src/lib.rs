//! Drivers built on top of the flocking engine: a headless runner that
//! streams statistics to disk and a parallel parameter sweep.

pub mod runner;
pub mod sweep;

pub use runner::{run, HeadlessRun, RunSummary};
pub use sweep::{write_sweep_csv, SweepPlan, SweepResult};
