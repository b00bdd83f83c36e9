//! Multi-factor Monte Carlo simulation of correlated forward rates.
//!
//! This crate evolves a vector of forward rates jointly under a log-Euler
//! discretisation with a no-arbitrage drift, driven by per-rate normal
//! draws from independently seeded generator lanes. Paths are independent
//! and run in parallel; with an explicit seed the output is bit-for-bit
//! reproducible regardless of thread count.
//!
//! # Structure
//!
//! - [`simulation`]: configuration, the path engine and output containers
//! - [`rng`]: seeded normal variate lanes and the per-path driver grid
//! - [`validate`]: variance back-test of terminal log rate levels
//! - [`error`]: configuration, runtime and validation error types
//!
//! Closed-form market components (rate curve, correlation matrix,
//! volatility curve) live in `lmm_core` and are re-consumed here.
//!
//! # Example
//!
//! ```rust
//! use lmm_core::correlation::CorrelationParams;
//! use lmm_core::curve::RateCurve;
//! use lmm_core::volatility::VolatilityParams;
//! use lmm_pricing::simulation::{ForwardRateSimulator, SimulationConfig};
//! use lmm_pricing::validate::VarianceValidator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let curve = RateCurve::new(
//!     &[0.25, 0.5, 1.0, 2.0],
//!     &[0.0007, 0.0009, 0.001, 0.0016],
//! )?;
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(3)
//!     .projection_years(0.75)
//!     .maturity(1.0)
//!     .tenor_spacing(0.25)
//!     .correlation(CorrelationParams::new(0.99, 0.5, 0.5))
//!     .volatility(VolatilityParams::new(0.19, 0.97, 0.08, 0.01))
//!     .seed(42)
//!     .build()?;
//! let dt = config.dt();
//!
//! let simulator = ForwardRateSimulator::new(config, &curve)?;
//! let output = simulator.simulate()?;
//!
//! let validator = VarianceValidator::new(3, vec![3, 3, 3]);
//! let report = validator.validate(&output, simulator.volatility(), dt)?;
//! println!("variance ratio deviation: {:.4}", report.relative_error);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod rng;
pub mod simulation;
pub mod validate;

pub use error::{ConfigError, SimulationError, ValidationError};
pub use simulation::{
    ForwardRateSimulator, PathMatrix, SimulationConfig, SimulationConfigBuilder, SimulationOutput,
};
pub use validate::{VarianceReport, VarianceValidator};
