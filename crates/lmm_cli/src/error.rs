//! CLI error types.

use thiserror::Error;

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Top-level CLI error.
#[derive(Error, Debug)]
pub enum CliError {
    /// A referenced input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument was malformed or unsupported.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Every simulated path failed; there are no statistics to report.
    #[error("All {failed} paths failed on numerical anomalies; nothing to report")]
    AllPathsFailed {
        /// Number of failed paths.
        failed: usize,
    },

    /// Reading an input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A curve file could not be parsed.
    #[error("Curve file error: {0}")]
    CurveFile(#[from] serde_json::Error),

    /// Curve construction failed.
    #[error(transparent)]
    Curve(#[from] lmm_core::error::CurveError),

    /// Simulation configuration was rejected.
    #[error(transparent)]
    Config(#[from] lmm_pricing::ConfigError),

    /// The simulation itself failed.
    #[error(transparent)]
    Simulation(#[from] lmm_pricing::SimulationError),

    /// The variance back-test was rejected.
    #[error(transparent)]
    Validation(#[from] lmm_pricing::ValidationError),
}
