//! Error types for curve and model construction.
//!
//! This module provides structured error handling for term-structure and
//! closed-form model operations. Configuration problems are detected at
//! construction time and reported with enough context to identify the
//! offending input; they are never coerced into NaN or silently clamped.

use thiserror::Error;

/// Term-structure curve errors.
///
/// # Variants
///
/// - `Empty`: Curve constructed with no points
/// - `LengthMismatch`: Tenor and rate slices of different length
/// - `NonIncreasingTenors`: Tenor grid not strictly increasing
/// - `NonPositiveTenor`: Tenor at or below zero
/// - `DegenerateInterval`: Zero-width forward interval
///
/// # Examples
///
/// ```
/// use lmm_core::curve::RateCurve;
/// use lmm_core::error::CurveError;
///
/// let result = RateCurve::new(&[], &[]);
/// assert_eq!(result.unwrap_err(), CurveError::Empty);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve has no points.
    #[error("Term structure must contain at least one point")]
    Empty,

    /// Tenor and rate slices differ in length.
    #[error("Tenor/rate length mismatch: {tenors} tenors, {rates} rates")]
    LengthMismatch {
        /// Number of tenors provided.
        tenors: usize,
        /// Number of rates provided.
        rates: usize,
    },

    /// Tenors are not strictly increasing.
    #[error("Tenors must be strictly increasing: violation at index {index}")]
    NonIncreasingTenors {
        /// Index of the first offending tenor.
        index: usize,
    },

    /// A tenor is zero, negative, or non-finite.
    #[error("Invalid tenor at index {index}: {tenor}")]
    NonPositiveTenor {
        /// Index of the offending tenor.
        index: usize,
        /// The offending value.
        tenor: f64,
    },

    /// Flat-forward interval has zero width.
    #[error("Degenerate forward interval: t1 = t2 = {t}")]
    DegenerateInterval {
        /// The coincident interval endpoint.
        t: f64,
    },
}

/// Closed-form model construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Requested factor count is zero.
    #[error("Model dimension must be positive")]
    ZeroDimension,

    /// Tenor spacing is zero, negative, or non-finite.
    #[error("Invalid tenor spacing: {tau}")]
    InvalidTenorSpacing {
        /// The offending spacing value.
        tau: f64,
    },

    /// A model parameter is non-finite.
    #[error("Non-finite model parameter '{name}': {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}
