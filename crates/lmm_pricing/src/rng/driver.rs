//! Pre-generated random driver grid for one simulation path.

use super::NormalVariateSource;

/// A `factors × steps` grid of normal draws for one path.
///
/// Built eagerly at construction, one source draw per cell with lane =
/// factor index, so repeated access within a path is deterministic from a
/// fixed seed set. [`get`](DriverMatrix::get) is a pure lookup.
///
/// Stored factor-major: all steps of factor 0, then factor 1, and so on.
#[derive(Clone, Debug)]
pub struct DriverMatrix {
    n_factors: usize,
    n_steps: usize,
    data: Vec<f64>,
}

impl DriverMatrix {
    /// Fills a grid from `source`, one lane per factor.
    ///
    /// The factor count is the source's lane count.
    pub fn generate(source: &mut NormalVariateSource, n_steps: usize) -> Self {
        let n_factors = source.n_lanes();
        let mut data = vec![0.0; n_factors * n_steps];
        for factor in 0..n_factors {
            for step in 0..n_steps {
                data[factor * n_steps + step] = source.draw(factor);
            }
        }
        Self {
            n_factors,
            n_steps,
            data,
        }
    }

    /// An all-zero grid, for deterministic drift-only evolution.
    pub fn zeros(n_factors: usize, n_steps: usize) -> Self {
        Self {
            n_factors,
            n_steps,
            data: vec![0.0; n_factors * n_steps],
        }
    }

    /// Returns the factor count.
    #[inline]
    pub fn n_factors(&self) -> usize {
        self.n_factors
    }

    /// Returns the step count.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the draw for `(factor, step)`.
    ///
    /// # Panics
    ///
    /// Debug builds assert both indices are in range.
    #[inline]
    pub fn get(&self, factor: usize, step: usize) -> f64 {
        debug_assert!(factor < self.n_factors, "factor index out of range");
        debug_assert!(step < self.n_steps, "step index out of range");
        self.data[factor * self.n_steps + step]
    }
}
