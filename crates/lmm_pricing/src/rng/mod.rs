//! Random drivers for the forward-rate simulation.
//!
//! Two pieces live here:
//!
//! - [`NormalVariateSource`]: one independently seeded generator per
//!   logical lane (one lane per factor, or one lane per path). Lanes never
//!   share state, which keeps the factors statistically independent before
//!   any correlation weighting is applied at simulation time.
//! - [`DriverMatrix`]: an eagerly generated `factors × steps` grid of
//!   standard-normal draws for one path, a pure lookup afterwards.

mod driver;
mod source;

pub use driver::DriverMatrix;
pub use source::NormalVariateSource;
