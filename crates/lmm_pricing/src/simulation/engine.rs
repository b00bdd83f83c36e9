//! Forward-rate path simulation.
//!
//! [`ForwardRateSimulator`] evolves a vector of forward rates jointly
//! across time steps under a single numeraire measure, using a log-Euler
//! discretisation:
//!
//! ```text
//! F[j] ← F[j] · exp(drift·dt − 0.5·σ(j)²·dt + σ(j)·Z[j,step]·√dt)
//! ```
//!
//! The no-arbitrage drift for rate j splits at the numeraire index: rates
//! maturing before the numeraire date accumulate a negative sum over
//! k = j+1 .. numer−1, rates at or after it a positive sum over
//! k = numer .. j, each term being
//!
//! ```text
//! corr(j,k)·σ(k)·σ(j)·τ·F[k] / (1 + τ·F[k]) · dt
//! ```
//!
//! Within a step, rates are updated in increasing index order and the sum
//! reads the current working vector, so lower-indexed rates that were
//! already advanced this step feed the drift of higher-indexed ones (the
//! cascade convention). Numeraire index 1 therefore reproduces the plain
//! cascade sum k = 1..=j; index `n_rates + 1` is the terminal measure,
//! whose drift sum is empty for the last rate.
//!
//! The exponential update keeps every rate strictly positive given a
//! positive initial rate. Extreme parameter combinations (very large
//! drift, very small dt) can still overflow the exponential; such paths
//! fail whole and are reported through the failed-path count.

use lmm_core::correlation::CorrelationMatrix;
use lmm_core::curve::RateCurve;
use lmm_core::volatility::VolatilityCurve;
use rand::rngs::OsRng;
use rand::RngCore;
use rayon::prelude::*;

use super::config::SimulationConfig;
use super::output::{PathMatrix, SimulationOutput};
use crate::error::{ConfigError, SimulationError};
use crate::rng::{DriverMatrix, NormalVariateSource};

/// SplitMix64 increment.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finaliser, used to derive disjoint per-lane seeds.
#[inline]
fn splitmix64(state: u64) -> u64 {
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Multi-factor forward-rate Monte Carlo simulator.
///
/// Holds the immutable configuration of one run: the derived rate count,
/// the correlation matrix, the volatility curve and the bootstrapped
/// initial rate vector. Paths are simulated independently, each with its
/// own freshly generated [`DriverMatrix`]; no path reuses another path's
/// draws. The shared state is read-only for the duration of the run, so
/// paths are distributed over a rayon thread pool without locking, and
/// per-path seeds are derived deterministically from the base seed so the
/// output does not depend on the number of worker threads.
///
/// # Examples
///
/// ```rust
/// use lmm_core::correlation::CorrelationParams;
/// use lmm_core::curve::RateCurve;
/// use lmm_core::volatility::VolatilityParams;
/// use lmm_pricing::simulation::{ForwardRateSimulator, SimulationConfig};
///
/// let curve = RateCurve::new(&[0.25, 1.0, 30.0], &[0.0007, 0.001, 0.0188]).unwrap();
/// let config = SimulationConfig::builder()
///     .n_paths(100)
///     .n_steps(3)
///     .projection_years(0.75)
///     .maturity(1.0)
///     .tenor_spacing(0.25)
///     .correlation(CorrelationParams::new(0.99, 0.5, 0.5))
///     .volatility(VolatilityParams::new(0.19, 0.97, 0.08, 0.01))
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let simulator = ForwardRateSimulator::new(config, &curve).unwrap();
/// let output = simulator.simulate().unwrap();
/// assert_eq!(output.n_paths(), 100);
/// ```
#[derive(Debug)]
pub struct ForwardRateSimulator {
    config: SimulationConfig,
    correlation: CorrelationMatrix,
    volatility: VolatilityCurve,
    initial_rates: Vec<f64>,
}

impl ForwardRateSimulator {
    /// Creates a simulator, bootstrapping initial rates from `curve`.
    ///
    /// The initial rate for index i (1-based) is the flat forward over
    /// `[i·τ, i·τ + τ]` implied by the curve. The correlation matrix and
    /// volatility curve are built from the configured parameters at the
    /// derived rate count.
    ///
    /// # Errors
    ///
    /// Propagates curve and model construction failures, and rejects a
    /// bootstrap that produces a non-positive initial rate (the log-normal
    /// update requires strictly positive seeds).
    pub fn new(config: SimulationConfig, curve: &RateCurve) -> Result<Self, SimulationError> {
        let tau = config.tenor_spacing();
        let mut initial_rates = Vec::with_capacity(config.n_rates());
        for i in 1..=config.n_rates() {
            let start = tau * i as f64;
            initial_rates.push(curve.flat_forward(start, start + tau)?);
        }

        let correlation =
            CorrelationMatrix::from_params(config.correlation(), config.n_rates(), tau)
                .map_err(ConfigError::from)?;
        let volatility = VolatilityCurve::from_params(config.volatility(), config.n_rates(), tau)
            .map_err(ConfigError::from)?;

        Self::from_parts(config, correlation, volatility, initial_rates)
    }

    /// Creates a simulator from pre-built components.
    ///
    /// # Errors
    ///
    /// Dimension mismatches between the correlation matrix, volatility
    /// curve or initial rate vector and the configured rate count are
    /// configuration errors, never silently truncated. Non-positive or
    /// non-finite initial rates are rejected.
    pub fn from_parts(
        config: SimulationConfig,
        correlation: CorrelationMatrix,
        volatility: VolatilityCurve,
        initial_rates: Vec<f64>,
    ) -> Result<Self, SimulationError> {
        let n_rates = config.n_rates();
        if correlation.dim() != n_rates {
            return Err(SimulationError::DimensionMismatch {
                component: "correlation matrix",
                expected: n_rates,
                got: correlation.dim(),
            });
        }
        if volatility.dim() != n_rates {
            return Err(SimulationError::DimensionMismatch {
                component: "volatility curve",
                expected: n_rates,
                got: volatility.dim(),
            });
        }
        if initial_rates.len() != n_rates {
            return Err(SimulationError::DimensionMismatch {
                component: "initial rates",
                expected: n_rates,
                got: initial_rates.len(),
            });
        }
        for (index, &rate) in initial_rates.iter().enumerate() {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(SimulationError::Config(ConfigError::InvalidParameter {
                    name: "initial_rates",
                    value: format!("rate {} is {rate}, must be finite and positive", index + 1),
                }));
            }
        }

        Ok(Self {
            config,
            correlation,
            volatility,
            initial_rates,
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the bootstrapped initial rate vector.
    #[inline]
    pub fn initial_rates(&self) -> &[f64] {
        &self.initial_rates
    }

    /// Returns the volatility curve in use.
    #[inline]
    pub fn volatility(&self) -> &VolatilityCurve {
        &self.volatility
    }

    /// Returns the correlation matrix in use.
    #[inline]
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Simulates all configured paths (single-curve mode).
    ///
    /// Every path starts from the bootstrapped initial rate vector. With
    /// an explicit seed the output is bit-for-bit reproducible; without
    /// one, a base seed is drawn from the operating system and the output
    /// varies run to run.
    pub fn simulate(&self) -> Result<SimulationOutput, SimulationError> {
        self.run(None)
    }

    /// Simulates all paths, re-seeding the shortest-maturity rate each step
    /// (path-initialisation mode).
    ///
    /// Before each step, the front rate is overwritten with
    /// `front_rates[step]`. Used when only a subset of rates is tracked
    /// forward and the front rate is exogenously rolled.
    ///
    /// # Errors
    ///
    /// The sequence length must equal the step count, and every value must
    /// be finite and positive.
    pub fn simulate_with_front_rates(
        &self,
        front_rates: &[f64],
    ) -> Result<SimulationOutput, SimulationError> {
        if front_rates.len() != self.config.n_steps() {
            return Err(SimulationError::FrontRateLength {
                expected: self.config.n_steps(),
                got: front_rates.len(),
            });
        }
        for (step, &rate) in front_rates.iter().enumerate() {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(SimulationError::Config(ConfigError::InvalidParameter {
                    name: "front_rates",
                    value: format!("value at step {step} is {rate}, must be finite and positive"),
                }));
            }
        }
        self.run(Some(front_rates))
    }

    fn run(&self, front_rates: Option<&[f64]>) -> Result<SimulationOutput, SimulationError> {
        let base_seed = match self.config.seed() {
            Some(seed) => seed,
            None => OsRng.next_u64(),
        };

        let n_rates = self.config.n_rates();
        let n_steps = self.config.n_steps();

        let results: Vec<Option<PathMatrix>> = (0..self.config.n_paths())
            .into_par_iter()
            .map(|path_idx| {
                let seeds = path_lane_seeds(base_seed, path_idx, n_rates);
                let mut source = NormalVariateSource::standard_with_seeds(&seeds);
                let driver = DriverMatrix::generate(&mut source, n_steps);
                self.evolve(&driver, front_rates).ok()
            })
            .collect();

        let mut paths = Vec::with_capacity(results.len());
        let mut failed_paths = 0;
        for result in results {
            match result {
                Some(path) => paths.push(path),
                None => failed_paths += 1,
            }
        }

        Ok(SimulationOutput::new(paths, failed_paths))
    }

    /// Evolves one path with a caller-supplied driver grid.
    ///
    /// This is the deterministic core of [`simulate`](Self::simulate):
    /// supplying an explicit [`DriverMatrix`] (for instance
    /// [`DriverMatrix::zeros`]) isolates the drift and volatility terms
    /// from the random input.
    ///
    /// # Errors
    ///
    /// Rejects a driver whose dimensions do not match the configuration,
    /// and abandons the path on the first non-finite rate.
    pub fn evolve_path(&self, driver: &DriverMatrix) -> Result<PathMatrix, SimulationError> {
        self.evolve(driver, None)
    }

    fn evolve(
        &self,
        driver: &DriverMatrix,
        front_rates: Option<&[f64]>,
    ) -> Result<PathMatrix, SimulationError> {
        let n_rates = self.config.n_rates();
        let n_steps = self.config.n_steps();
        if driver.n_factors() != n_rates {
            return Err(SimulationError::DimensionMismatch {
                component: "driver matrix factors",
                expected: n_rates,
                got: driver.n_factors(),
            });
        }
        if driver.n_steps() != n_steps {
            return Err(SimulationError::DimensionMismatch {
                component: "driver matrix steps",
                expected: n_steps,
                got: driver.n_steps(),
            });
        }

        let tau = self.config.tenor_spacing();
        let dt = self.config.dt();
        let sqrt_dt = dt.sqrt();
        let numer = self.config.numeraire();

        let mut rates = self.initial_rates.clone();
        let mut path = PathMatrix::new(n_rates, n_steps);

        for step in 0..n_steps {
            if let Some(front) = front_rates {
                rates[0] = front[step];
            }
            for j in 1..=n_rates {
                let sigma_j = self.volatility.sigma(j);

                let mut drift = 0.0;
                if j < numer {
                    for k in (j + 1)..numer {
                        drift -= self.drift_term(j, k, sigma_j, &rates, tau, dt);
                    }
                } else {
                    for k in numer..=j {
                        drift += self.drift_term(j, k, sigma_j, &rates, tau, dt);
                    }
                }

                let z = driver.get(j - 1, step);
                let exponent = drift * dt - 0.5 * sigma_j * sigma_j * dt + sigma_j * z * sqrt_dt;
                rates[j - 1] *= exponent.exp();

                if !rates[j - 1].is_finite() {
                    return Err(SimulationError::NumericalAnomaly { rate: j, step });
                }
            }
            path.record_step(step, &rates);
        }

        Ok(path)
    }

    #[inline]
    fn drift_term(
        &self,
        j: usize,
        k: usize,
        sigma_j: f64,
        rates: &[f64],
        tau: f64,
        dt: f64,
    ) -> f64 {
        let f_k = rates[k - 1];
        self.correlation.corr(j, k) * self.volatility.sigma(k) * sigma_j * tau * f_k
            / (1.0 + tau * f_k)
            * dt
    }
}

/// Derives the per-lane seeds for one path from the base seed.
///
/// Lane `l` of path `p` uses SplitMix64 output number `p·n_factors + l`
/// of the stream anchored at `base_seed`, so every (path, lane) pair maps
/// to a distinct, deterministic seed and no two paths ever share
/// generator state.
fn path_lane_seeds(base_seed: u64, path_idx: usize, n_factors: usize) -> Vec<u64> {
    (0..n_factors)
        .map(|lane| {
            let counter = (path_idx * n_factors + lane) as u64;
            splitmix64(base_seed.wrapping_add(counter.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lmm_core::correlation::CorrelationParams;
    use lmm_core::volatility::VolatilityParams;

    fn market_curve() -> RateCurve {
        RateCurve::new(
            &[
                1.0 / 12.0,
                1.0 / 6.0,
                0.25,
                0.5,
                1.0,
                2.0,
                3.0,
                5.0,
                7.0,
                10.0,
                20.0,
                30.0,
            ],
            &[
                0.0005, 0.0006, 0.0007, 0.0009, 0.001, 0.0016, 0.0023, 0.0049, 0.0082, 0.0115,
                0.0169, 0.0188,
            ],
        )
        .unwrap()
    }

    fn reference_config(n_paths: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .n_paths(n_paths)
            .n_steps(3)
            .projection_years(0.75)
            .maturity(1.0)
            .tenor_spacing(0.25)
            .correlation(CorrelationParams::new(0.99, 0.5, 0.5))
            .volatility(VolatilityParams::new(0.19, 0.97, 0.08, 0.01))
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_bootstrap_matches_curve_forwards() {
        let curve = market_curve();
        let simulator = ForwardRateSimulator::new(reference_config(10, 1), &curve).unwrap();

        assert_eq!(simulator.initial_rates().len(), 3);
        for i in 1..=3usize {
            let start = 0.25 * i as f64;
            let expected = curve.flat_forward(start, start + 0.25).unwrap();
            assert_relative_eq!(simulator.initial_rates()[i - 1], expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_debug_rendering() {
        let curve = market_curve();
        let simulator = ForwardRateSimulator::new(reference_config(10, 1), &curve).unwrap();
        assert!(format!("{simulator:?}").contains("ForwardRateSimulator"));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let config = reference_config(10, 1);
        let correlation =
            CorrelationMatrix::from_params(CorrelationParams::new(0.99, 0.5, 0.5), 2, 0.25)
                .unwrap();
        let volatility =
            VolatilityCurve::from_params(VolatilityParams::new(0.19, 0.97, 0.08, 0.01), 3, 0.25)
                .unwrap();

        let err = ForwardRateSimulator::from_parts(
            config,
            correlation,
            volatility,
            vec![0.001, 0.001, 0.001],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::DimensionMismatch {
                component: "correlation matrix",
                expected: 3,
                got: 2,
            }
        ));
    }

    #[test]
    fn test_non_positive_initial_rate_rejected() {
        let config = reference_config(10, 1);
        let correlation =
            CorrelationMatrix::from_params(CorrelationParams::new(0.99, 0.5, 0.5), 3, 0.25)
                .unwrap();
        let volatility =
            VolatilityCurve::from_params(VolatilityParams::new(0.19, 0.97, 0.08, 0.01), 3, 0.25)
                .unwrap();

        let err =
            ForwardRateSimulator::from_parts(config, correlation, volatility, vec![0.001, -0.001, 0.001])
                .unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }

    #[test]
    fn test_positivity_invariant() {
        let curve = market_curve();
        let simulator = ForwardRateSimulator::new(reference_config(200, 7), &curve).unwrap();
        let output = simulator.simulate().unwrap();

        assert_eq!(output.failed_paths(), 0);
        for path in output.paths() {
            for rate in 0..path.n_rates() {
                for step in 0..path.n_steps() {
                    assert!(path.get(rate, step) > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_reproducibility_with_explicit_seed() {
        let curve = market_curve();
        let s1 = ForwardRateSimulator::new(reference_config(50, 42), &curve).unwrap();
        let s2 = ForwardRateSimulator::new(reference_config(50, 42), &curve).unwrap();

        assert_eq!(s1.simulate().unwrap(), s2.simulate().unwrap());
    }

    #[test]
    fn test_different_seeds_differ() {
        let curve = market_curve();
        let s1 = ForwardRateSimulator::new(reference_config(50, 42), &curve).unwrap();
        let s2 = ForwardRateSimulator::new(reference_config(50, 43), &curve).unwrap();

        assert_ne!(s1.simulate().unwrap(), s2.simulate().unwrap());
    }

    #[test]
    fn test_deterministic_decay_with_zero_driver() {
        // One rate, terminal numeraire: the drift sum is empty, and with a
        // zero driver the update collapses to F ← F·exp(−0.5σ²·dt).
        let config = SimulationConfig::builder()
            .n_paths(1)
            .n_steps(4)
            .projection_years(1.0)
            .maturity(0.5)
            .tenor_spacing(0.25)
            .numeraire(2)
            .correlation(CorrelationParams::new(0.99, 0.5, 0.5))
            .volatility(VolatilityParams::new(0.0, 0.0, 0.2, 0.0))
            .seed(1)
            .build()
            .unwrap();
        assert_eq!(config.n_rates(), 1);

        let correlation =
            CorrelationMatrix::from_params(CorrelationParams::new(0.99, 0.5, 0.5), 1, 0.25)
                .unwrap();
        let volatility =
            VolatilityCurve::from_params(VolatilityParams::new(0.0, 0.0, 0.2, 0.0), 1, 0.25)
                .unwrap();
        let simulator =
            ForwardRateSimulator::from_parts(config, correlation, volatility, vec![0.05]).unwrap();

        let path = simulator.evolve_path(&DriverMatrix::zeros(1, 4)).unwrap();

        let decay = (-0.5 * 0.2 * 0.2 * 0.25_f64).exp();
        let mut expected = 0.05;
        for step in 0..4 {
            expected *= decay;
            assert_relative_eq!(path.get(0, step), expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_spot_numeraire_reproduces_cascade_sum() {
        // With numeraire 1 the drift for rate j must equal the plain
        // cascade sum over k = 1..=j; replaying the recursion by hand on a
        // zero driver must reproduce the engine's trajectory exactly.
        let curve = market_curve();
        let config = reference_config(1, 1);
        let simulator = ForwardRateSimulator::new(config, &curve).unwrap();
        let path = simulator.evolve_path(&DriverMatrix::zeros(3, 3)).unwrap();

        let tau = 0.25;
        let dt = 0.25;
        let corr = simulator.correlation();
        let vols = simulator.volatility();
        let mut f = simulator.initial_rates().to_vec();
        for step in 0..3 {
            for j in 1..=3usize {
                let mut mu = 0.0;
                for k in 1..=j {
                    mu += corr.corr(j, k) * vols.sigma(k) * vols.sigma(j) * tau * f[k - 1]
                        / (1.0 + tau * f[k - 1])
                        * dt;
                }
                f[j - 1] *= (mu * dt - 0.5 * vols.sigma(j) * vols.sigma(j) * dt).exp();
                assert_eq!(path.get(j - 1, step), f[j - 1]);
            }
        }
    }

    #[test]
    fn test_front_rate_reseeding() {
        let curve = market_curve();
        let simulator = ForwardRateSimulator::new(reference_config(5, 9), &curve).unwrap();

        let front = [0.002, 0.003, 0.004];
        let output = simulator.simulate_with_front_rates(&front).unwrap();
        assert_eq!(output.n_paths(), 5);

        // Wrong length is rejected up front.
        let err = simulator.simulate_with_front_rates(&[0.002]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::FrontRateLength { expected: 3, got: 1 }
        ));

        // Non-positive front rates are rejected.
        let err = simulator
            .simulate_with_front_rates(&[0.002, -0.003, 0.004])
            .unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }

    #[test]
    fn test_path_lane_seeds_disjoint() {
        let a = path_lane_seeds(42, 0, 4);
        let b = path_lane_seeds(42, 1, 4);
        assert_eq!(a.len(), 4);
        for seed in &a {
            assert!(!b.contains(seed));
        }
        // And consecutive paths continue the same SplitMix64 stream.
        let wide = path_lane_seeds(42, 0, 8);
        assert_eq!(&wide[4..], &b[..]);
    }
}
