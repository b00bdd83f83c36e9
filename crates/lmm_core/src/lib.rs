//! # lmm_core: Foundation for the Forward-Rate Simulation Engine
//!
//! ## Core Layer Role
//!
//! lmm_core is the bottom layer of the workspace, providing the read-only
//! configuration objects the simulation engine consumes:
//! - Term-structure curve with piecewise-linear interpolation (`curve`)
//! - Closed-form factor correlation matrix (`correlation`)
//! - Closed-form humped instantaneous volatility curve (`volatility`)
//! - Structured error types (`error`)
//!
//! ## Zero Dependency Principle
//!
//! The core layer has no dependencies on other lmm_* crates, with a single
//! external dependency:
//! - thiserror: Structured error derivation
//!
//! ## Usage Example
//!
//! ```rust
//! use lmm_core::curve::RateCurve;
//!
//! let curve = RateCurve::new(&[0.25, 1.0, 30.0], &[0.0006, 0.001, 0.0188]).unwrap();
//! let spot = curve.rate_at(0.5);
//! assert!(spot > 0.0006 && spot < 0.001);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod correlation;
pub mod curve;
pub mod error;
pub mod volatility;

pub use correlation::{CorrelationMatrix, CorrelationParams};
pub use curve::RateCurve;
pub use error::{CurveError, ModelError};
pub use volatility::{VolatilityCurve, VolatilityParams};
