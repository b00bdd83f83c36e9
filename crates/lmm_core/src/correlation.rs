//! Closed-form factor correlation matrix.
//!
//! The correlation between forward rates i and j (1-indexed factor
//! positions, tenor spacing τ) is generated from three decay parameters:
//!
//! ```text
//! corr(i, j) = ρ∞ + (1 − ρ∞) · exp(−λ·|i−j|·τ / (1 + κ·min(i,j)·τ))
//! ```
//!
//! The shape is distance-decaying: adjacent rates are highly correlated,
//! distant rates decay towards the asymptote ρ∞, and the κ term slows the
//! decay for longer-dated rate pairs. The matrix is symmetric with a unit
//! diagonal by construction and is built once per simulation run.
//!
//! The 1-based index convention matters: the drift summation in the engine
//! consumes this matrix with the same indices it uses for the volatility
//! curve and the working rate vector.

use crate::error::ModelError;

/// Decay parameters for the factor correlation matrix.
///
/// # Fields
///
/// * `rho_inf` - Asymptotic correlation between infinitely distant rates (ρ∞)
/// * `lambda` - Decay speed with inter-rate distance (λ)
/// * `kappa` - Decay damping with the earlier rate's maturity (κ)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationParams {
    /// Asymptotic correlation ρ∞.
    pub rho_inf: f64,
    /// Distance decay speed λ.
    pub lambda: f64,
    /// Maturity damping κ.
    pub kappa: f64,
}

impl CorrelationParams {
    /// Creates a new parameter set.
    #[inline]
    pub fn new(rho_inf: f64, lambda: f64, kappa: f64) -> Self {
        Self {
            rho_inf,
            lambda,
            kappa,
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [
            ("rho_inf", self.rho_inf),
            ("lambda", self.lambda),
            ("kappa", self.kappa),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Factor correlation matrix, built once and read-only afterwards.
///
/// Stored as a flat row-major square of dimension `n`. Accessors take the
/// 1-based factor positions used throughout the engine.
///
/// # Examples
///
/// ```
/// use lmm_core::correlation::{CorrelationMatrix, CorrelationParams};
///
/// let params = CorrelationParams::new(0.99, 0.5, 0.5);
/// let corr = CorrelationMatrix::from_params(params, 3, 0.25).unwrap();
///
/// assert_eq!(corr.corr(2, 2), 1.0);
/// assert_eq!(corr.corr(1, 3), corr.corr(3, 1));
/// ```
#[derive(Clone, Debug)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order.
    data: Vec<f64>,
    /// Matrix dimension (n x n).
    dim: usize,
}

impl CorrelationMatrix {
    /// Builds the matrix for `dim` forward rates spaced `tau` years apart.
    ///
    /// # Errors
    ///
    /// - [`ModelError::ZeroDimension`] when `dim` is zero
    /// - [`ModelError::InvalidTenorSpacing`] when `tau` is not finite and positive
    /// - [`ModelError::NonFiniteParameter`] when a decay parameter is not finite
    pub fn from_params(
        params: CorrelationParams,
        dim: usize,
        tau: f64,
    ) -> Result<Self, ModelError> {
        if dim == 0 {
            return Err(ModelError::ZeroDimension);
        }
        if !tau.is_finite() || tau <= 0.0 {
            return Err(ModelError::InvalidTenorSpacing { tau });
        }
        params.validate()?;

        let mut data = vec![0.0; dim * dim];
        for i in 1..=dim {
            for j in 1..=dim {
                let distance = (i as f64 - j as f64).abs() * tau;
                let damping = 1.0 + params.kappa * (i.min(j) as f64) * tau;
                data[(i - 1) * dim + (j - 1)] = params.rho_inf
                    + (1.0 - params.rho_inf) * (-params.lambda * distance / damping).exp();
            }
        }

        Ok(Self { data, dim })
    }

    /// Returns the matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Correlation between factor positions `i` and `j` (1-indexed).
    ///
    /// # Panics
    ///
    /// Debug builds assert `1 <= i, j <= dim`.
    #[inline]
    pub fn corr(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i >= 1 && i <= self.dim, "factor index i out of range");
        debug_assert!(j >= 1 && j <= self.dim, "factor index j out of range");
        self.data[(i - 1) * self.dim + (j - 1)]
    }
}
