//! Term-structure curve with piecewise-linear interpolation.
//!
//! A [`RateCurve`] holds an ordered (tenor, rate) term structure and answers
//! spot-rate queries by linear interpolation between the two bracketing
//! points. Queries outside the tenor grid extrapolate flat: at or below the
//! first tenor the first rate is returned, at or above the last tenor the
//! last rate. The curve also yields the flat forward rate implied by two
//! spot-rate endpoints, which is what the simulation engine uses to
//! bootstrap its initial forward-rate vector.

use crate::error::CurveError;

/// Piecewise-linear term-structure curve.
///
/// Constructed once from (tenor, rate) pairs and read-only afterwards.
/// Tenors must be strictly increasing and positive; at least one point is
/// required. A single-point curve is valid and behaves as a flat curve.
///
/// # Examples
///
/// ```
/// use lmm_core::curve::RateCurve;
///
/// let curve = RateCurve::new(&[0.25, 1.0, 30.0], &[0.0006, 0.001, 0.0188]).unwrap();
///
/// // Knot point
/// assert_eq!(curve.rate_at(1.0), 0.001);
/// // Flat extrapolation below the grid
/// assert_eq!(curve.rate_at(0.01), 0.0006);
/// ```
#[derive(Debug, Clone)]
pub struct RateCurve {
    /// Strictly increasing tenors (years).
    tenors: Vec<f64>,
    /// Spot rates, one per tenor.
    rates: Vec<f64>,
}

impl RateCurve {
    /// Constructs a curve from parallel tenor and rate slices.
    ///
    /// # Errors
    ///
    /// - [`CurveError::Empty`] when no points are supplied
    /// - [`CurveError::LengthMismatch`] when the slices differ in length
    /// - [`CurveError::NonPositiveTenor`] when a tenor is not finite and positive
    /// - [`CurveError::NonIncreasingTenors`] when tenors are not strictly increasing
    pub fn new(tenors: &[f64], rates: &[f64]) -> Result<Self, CurveError> {
        if tenors.len() != rates.len() {
            return Err(CurveError::LengthMismatch {
                tenors: tenors.len(),
                rates: rates.len(),
            });
        }
        if tenors.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, &tenor) in tenors.iter().enumerate() {
            if !tenor.is_finite() || tenor <= 0.0 {
                return Err(CurveError::NonPositiveTenor { index, tenor });
            }
            if index > 0 && tenor <= tenors[index - 1] {
                return Err(CurveError::NonIncreasingTenors { index });
            }
        }

        Ok(Self {
            tenors: tenors.to_vec(),
            rates: rates.to_vec(),
        })
    }

    /// Returns the number of curve points.
    #[inline]
    pub fn len(&self) -> usize {
        self.tenors.len()
    }

    /// Returns true if the curve has no points.
    ///
    /// Never true for a successfully constructed curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tenors.is_empty()
    }

    /// Returns the tenor grid.
    #[inline]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the spot rates in tenor order.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Spot rate at `tenor` by piecewise-linear interpolation.
    ///
    /// The bracketing segment is found with a lower-bound search
    /// (`partition_point`, O(log n)). Queries at or below the first tenor
    /// return the first rate; queries at or above the last tenor return the
    /// last rate. Extrapolation is flat, not linear.
    pub fn rate_at(&self, tenor: f64) -> f64 {
        // First index with tenors[index] >= tenor.
        let index = self.tenors.partition_point(|&t| t < tenor);

        if index == 0 {
            self.rates[0]
        } else if index >= self.tenors.len() {
            self.rates[self.tenors.len() - 1]
        } else {
            let slope = (self.rates[index] - self.rates[index - 1])
                / (self.tenors[index] - self.tenors[index - 1]);
            self.rates[index - 1] + slope * (tenor - self.tenors[index - 1])
        }
    }

    /// Flat forward rate over `[t1, t2]` implied by the endpoint spot rates.
    ///
    /// Computed as `(rate_at(t2)·t2 − rate_at(t1)·t1) / (t2 − t1)`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateInterval`] when `t1 == t2`, where the
    /// quotient would otherwise divide by zero.
    pub fn flat_forward(&self, t1: f64, t2: f64) -> Result<f64, CurveError> {
        if t1 == t2 {
            return Err(CurveError::DegenerateInterval { t: t1 });
        }
        Ok((self.rate_at(t2) * t2 - self.rate_at(t1) * t1) / (t2 - t1))
    }
}
