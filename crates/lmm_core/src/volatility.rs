//! Closed-form humped instantaneous volatility curve.
//!
//! One volatility per forward-rate index, generated from the four-parameter
//! humped shape
//!
//! ```text
//! σ(i) = (a·(i·τ) + d)·exp(−b·(i·τ)) + c
//! ```
//!
//! in maturity `i·τ`. With a > 0 and b > 0 the curve rises to a hump and
//! then decays towards the floor c, the shape commonly assumed for
//! forward-rate instantaneous volatility. Built once per simulation run and
//! immutable afterwards.

use crate::error::ModelError;

/// Humped-shape volatility parameters (a, b, c, d).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolatilityParams {
    /// Hump slope a.
    pub a: f64,
    /// Decay speed b.
    pub b: f64,
    /// Long-maturity floor c.
    pub c: f64,
    /// Short-maturity level d.
    pub d: f64,
}

impl VolatilityParams {
    /// Creates a new parameter set.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d)] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Instantaneous volatility curve, one value per forward-rate index.
///
/// Accessors take the same 1-based rate index convention as
/// [`CorrelationMatrix`](crate::correlation::CorrelationMatrix).
///
/// # Examples
///
/// ```
/// use lmm_core::volatility::{VolatilityCurve, VolatilityParams};
///
/// // a = 0 and d = 0 collapse the hump to the constant c.
/// let params = VolatilityParams::new(0.0, 0.0, 0.2, 0.0);
/// let vols = VolatilityCurve::from_params(params, 4, 0.25).unwrap();
/// assert_eq!(vols.sigma(3), 0.2);
/// ```
#[derive(Clone, Debug)]
pub struct VolatilityCurve {
    /// One volatility per forward-rate index.
    sigmas: Vec<f64>,
}

impl VolatilityCurve {
    /// Builds the curve for `dim` forward rates spaced `tau` years apart.
    ///
    /// # Errors
    ///
    /// - [`ModelError::ZeroDimension`] when `dim` is zero
    /// - [`ModelError::InvalidTenorSpacing`] when `tau` is not finite and positive
    /// - [`ModelError::NonFiniteParameter`] when a shape parameter is not finite
    pub fn from_params(params: VolatilityParams, dim: usize, tau: f64) -> Result<Self, ModelError> {
        if dim == 0 {
            return Err(ModelError::ZeroDimension);
        }
        if !tau.is_finite() || tau <= 0.0 {
            return Err(ModelError::InvalidTenorSpacing { tau });
        }
        params.validate()?;

        let sigmas = (1..=dim)
            .map(|i| {
                let maturity = i as f64 * tau;
                (params.a * maturity + params.d) * (-params.b * maturity).exp() + params.c
            })
            .collect();

        Ok(Self { sigmas })
    }

    /// Returns the number of forward-rate indices covered.
    #[inline]
    pub fn dim(&self) -> usize {
        self.sigmas.len()
    }

    /// Instantaneous volatility for forward-rate index `i` (1-indexed).
    ///
    /// # Panics
    ///
    /// Debug builds assert `1 <= i <= dim`.
    #[inline]
    pub fn sigma(&self, i: usize) -> f64 {
        debug_assert!(i >= 1 && i <= self.sigmas.len(), "rate index out of range");
        self.sigmas[i - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closed_form_values() {
        // Reference parameters: a = 0.19, b = 0.97, c = 0.08, d = 0.01.
        let params = VolatilityParams::new(0.19, 0.97, 0.08, 0.01);
        let vols = VolatilityCurve::from_params(params, 3, 0.25).unwrap();

        for i in 1..=3usize {
            let t = i as f64 * 0.25;
            let expected = (0.19 * t + 0.01) * (-0.97 * t).exp() + 0.08;
            assert_relative_eq!(vols.sigma(i), expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_constant_curve_when_hump_collapsed() {
        let params = VolatilityParams::new(0.0, 0.0, 0.2, 0.0);
        let vols = VolatilityCurve::from_params(params, 6, 0.25).unwrap();
        for i in 1..=6 {
            assert_eq!(vols.sigma(i), 0.2);
        }
    }

    #[test]
    fn test_humped_shape_rises_then_decays() {
        // With these parameters the hump peaks inside the grid: the curve
        // must rise at the short end and decay at the long end.
        let params = VolatilityParams::new(0.19, 0.97, 0.08, 0.01);
        let vols = VolatilityCurve::from_params(params, 40, 0.25).unwrap();

        assert!(vols.sigma(2) > vols.sigma(1));
        assert!(vols.sigma(40) < vols.sigma(8));
        // Long maturities approach the floor c from above.
        assert!(vols.sigma(40) > 0.08);
    }

    #[test]
    fn test_dim_reported() {
        let params = VolatilityParams::new(0.19, 0.97, 0.08, 0.01);
        let vols = VolatilityCurve::from_params(params, 11, 0.25).unwrap();
        assert_eq!(vols.dim(), 11);
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let params = VolatilityParams::new(0.19, 0.97, 0.08, 0.01);
        let err = VolatilityCurve::from_params(params, 0, 0.25).unwrap_err();
        assert_eq!(err, ModelError::ZeroDimension);
    }

    #[test]
    fn test_rejects_invalid_tau() {
        let params = VolatilityParams::new(0.19, 0.97, 0.08, 0.01);
        let err = VolatilityCurve::from_params(params, 3, f64::NAN).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTenorSpacing { .. }));
    }

    #[test]
    fn test_rejects_non_finite_parameter() {
        let params = VolatilityParams::new(0.19, f64::NAN, 0.08, 0.01);
        let err = VolatilityCurve::from_params(params, 3, 0.25).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteParameter { name: "b", .. }));
    }
}
