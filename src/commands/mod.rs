//! Command implementations for the CLI
//!
//! - estimate: Price the configured scenario
//! - sweep: Tabulate calculator sweeps
//! - history: Preview a simulated history window
//! - config: Configuration display and validation

pub mod config;
pub mod estimate;
pub mod history;
pub mod sweep;
