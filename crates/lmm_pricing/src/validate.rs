//! Variance back-test for simulated forward-rate paths.
//!
//! Under the log-Euler scheme the log of a forward rate accumulates
//! variance σ²·dt per step, so the sample variance of the terminal log
//! levels across paths has a known target. [`VarianceValidator`] compares
//! the two and reports the ratio as a chi-square style test statistic.

use crate::error::ValidationError;
use crate::simulation::SimulationOutput;
use lmm_core::volatility::VolatilityCurve;

/// Variance back-test over the terminal log levels of one forward rate.
///
/// `rate_index` selects the rate whose terminal distribution is tested
/// (1-based). `check_tenors` lists the volatility indices whose σ²·dt
/// contributions make up the target variance, one entry per simulated
/// step; for a rate whose reset does not roll during the projection this
/// is simply its own index repeated.
#[derive(Clone, Debug)]
pub struct VarianceValidator {
    rate_index: usize,
    check_tenors: Vec<usize>,
}

/// The result of one variance back-test.
///
/// `test_statistic` is `(n − 1) · sqrt(calculated / target)`, to be read
/// against a chi-square table with `degrees_of_freedom = n − 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceReport {
    /// Unbiased sample variance of the terminal log rate levels.
    pub calculated_variance: f64,
    /// Model-implied target variance, `Σ σ(tenor)²·dt`.
    pub target_variance: f64,
    /// `(n − 1) · sqrt(calculated / target)`.
    pub test_statistic: f64,
    /// `n − 1`, where n is the number of surviving paths.
    pub degrees_of_freedom: usize,
    /// `|calculated − target|`.
    pub absolute_error: f64,
    /// `calculated / target − 1`.
    pub relative_error: f64,
}

impl VarianceValidator {
    /// Creates a validator for one rate and its per-step check tenors.
    pub fn new(rate_index: usize, check_tenors: Vec<usize>) -> Self {
        Self {
            rate_index,
            check_tenors,
        }
    }

    /// Runs the back-test against a simulation output.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InsufficientPaths`] with fewer than two
    ///   surviving paths
    /// - [`ValidationError::RateIndexOutOfRange`] when the target rate is
    ///   not in the output
    /// - [`ValidationError::CheckTenorOutOfRange`] when a check tenor has
    ///   no volatility entry
    /// - [`ValidationError::DegenerateTargetVariance`] when the target is
    ///   zero and the ratio is undefined
    pub fn validate(
        &self,
        output: &SimulationOutput,
        volatility: &VolatilityCurve,
        dt: f64,
    ) -> Result<VarianceReport, ValidationError> {
        let n = output.n_paths();
        if n < 2 {
            return Err(ValidationError::InsufficientPaths { got: n });
        }
        let dim = output.paths()[0].n_rates();
        if self.rate_index == 0 || self.rate_index > dim {
            return Err(ValidationError::RateIndexOutOfRange {
                index: self.rate_index,
                dim,
            });
        }
        for &tenor in &self.check_tenors {
            if tenor == 0 || tenor > volatility.dim() {
                return Err(ValidationError::CheckTenorOutOfRange {
                    tenor,
                    dim: volatility.dim(),
                });
            }
        }

        let target_variance: f64 = self
            .check_tenors
            .iter()
            .map(|&tenor| {
                let sigma = volatility.sigma(tenor);
                sigma * sigma * dt
            })
            .sum();
        if target_variance == 0.0 {
            return Err(ValidationError::DegenerateTargetVariance);
        }

        // Two-pass unbiased sample variance of the terminal log levels.
        let logs: Vec<f64> = output
            .paths()
            .iter()
            .map(|path| path.terminal(self.rate_index - 1).ln())
            .collect();
        let mean = logs.iter().sum::<f64>() / n as f64;
        let calculated_variance = logs
            .iter()
            .map(|log| {
                let diff = log - mean;
                diff * diff
            })
            .sum::<f64>()
            / (n - 1) as f64;

        let ratio = calculated_variance / target_variance;
        Ok(VarianceReport {
            calculated_variance,
            target_variance,
            test_statistic: (n - 1) as f64 * ratio.sqrt(),
            degrees_of_freedom: n - 1,
            absolute_error: (calculated_variance - target_variance).abs(),
            relative_error: ratio - 1.0,
        })
    }
}
