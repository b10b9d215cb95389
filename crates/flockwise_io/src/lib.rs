//! # Flockwise IO
//!
//! Persistence collaborator for the flocking engine. The engine never
//! touches the file system; this crate provides:
//! - Per-step statistics export in the fixed tabular schema
//! - Generic CSV tables (used for parameter sweep summaries)
//! - JSON save/load of run seeds for deterministic replays
//! - Structured error handling

/// Error types and result aliases for I/O operations
pub mod error;
/// Tabular (CSV) export of statistics and summaries
pub mod export;
/// JSON persistence of run seeds and other serializable values
pub mod persistence;

pub use error::{IoError, Result};
pub use export::{stats_to_csv_string, write_stats_csv, write_table, StatsCsvWriter};
pub use persistence::{load_run_seed, read_json_file, save_run_seed, write_json_file};
