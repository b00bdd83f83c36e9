//! Error types for the simulation engine.
//!
//! Configuration errors are detected before any path is simulated and are
//! fatal to the run; there is no partial output. Per-path numerical
//! anomalies (non-finite rates from extreme parameter combinations) are not
//! individually recoverable mid-path, so the affected path fails whole and
//! is reported through the failed-path count on the output, never folded
//! into aggregate statistics.

use lmm_core::error::{CurveError, ModelError};
use thiserror::Error;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Configuration error for the forward-rate simulator.
///
/// These errors occur during construction when invalid parameters are
/// provided. They are never coerced or truncated away.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Path count outside `[1, MAX_PATHS]`.
    #[error("Invalid path count {0}: must be in range [1, {MAX_PATHS}]")]
    InvalidPathCount(usize),

    /// Step count outside `[1, MAX_STEPS]`.
    #[error("Invalid step count {0}: must be in range [1, {MAX_STEPS}]")]
    InvalidStepCount(usize),

    /// `maturity / tau - 1` does not yield a positive integral rate count.
    #[error("Invalid rate count: maturity {maturity} over spacing {tau} yields no live rates")]
    InvalidRateCount {
        /// Term-structure maturity (years).
        maturity: f64,
        /// Tenor spacing (years).
        tau: f64,
    },

    /// Numeraire index outside `[1, n_rates + 1]`.
    #[error("Invalid numeraire index {numeraire}: must be in range [1, {max}]")]
    InvalidNumeraire {
        /// The offending index.
        numeraire: usize,
        /// Largest admissible index (`n_rates + 1`, the terminal measure).
        max: usize,
    },

    /// Seed sequence shorter than the lane count.
    #[error("Seed sequence too short: {got} seeds for {expected} lanes")]
    SeedCountMismatch {
        /// Number of lanes requiring seeds.
        expected: usize,
        /// Number of seeds provided.
        got: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Closed-form model construction failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Runtime error for the forward-rate simulator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Component dimension does not match the simulator's rate count.
    #[error("Dimension mismatch for {component}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Offending component name.
        component: &'static str,
        /// Rate count expected by the simulator.
        expected: usize,
        /// Dimension actually supplied.
        got: usize,
    },

    /// Curve bootstrap failed.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Front-rate sequence length does not match the step count.
    #[error("Front-rate sequence length {got} does not match step count {expected}")]
    FrontRateLength {
        /// Step count of the simulation.
        expected: usize,
        /// Length of the supplied sequence.
        got: usize,
    },

    /// A rate became non-finite during path evolution.
    ///
    /// The log-Euler recursion has no resume point, so the whole path is
    /// abandoned when this occurs.
    #[error("Non-finite rate {rate} at step {step}: path abandoned")]
    NumericalAnomaly {
        /// 1-based rate index that became non-finite.
        rate: usize,
        /// Step at which the anomaly appeared.
        step: usize,
    },
}

/// Variance back-test error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Target variance is zero, so the variance ratio is undefined.
    #[error("Degenerate target variance: check-tenor set yields zero target variance")]
    DegenerateTargetVariance,

    /// Fewer than two surviving paths; sample variance is undefined.
    #[error("Insufficient paths for variance estimate: got {got}, need at least 2")]
    InsufficientPaths {
        /// Number of surviving paths.
        got: usize,
    },

    /// Target rate index outside `[1, n_rates]`.
    #[error("Rate index {index} out of range [1, {dim}]")]
    RateIndexOutOfRange {
        /// The offending 1-based rate index.
        index: usize,
        /// Number of simulated rates.
        dim: usize,
    },

    /// Check tenor outside `[1, n_rates]`.
    #[error("Check tenor {tenor} out of range [1, {dim}]")]
    CheckTenorOutOfRange {
        /// The offending tenor multiple.
        tenor: usize,
        /// Number of volatility indices.
        dim: usize,
    },
}
