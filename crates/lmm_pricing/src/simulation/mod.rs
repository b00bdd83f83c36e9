//! Monte Carlo forward-rate simulation.
//!
//! The engine is configured through [`SimulationConfig`], run via
//! [`ForwardRateSimulator`], and produces a [`SimulationOutput`] of
//! per-path [`PathMatrix`] trajectories.

mod config;
mod engine;
mod output;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use engine::ForwardRateSimulator;
pub use output::{PathMatrix, SimulationOutput};
