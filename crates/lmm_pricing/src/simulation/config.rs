//! Simulation configuration.
//!
//! [`SimulationConfig`] is the immutable parameter surface of the engine:
//! path and step counts, the simulated horizon, the term-structure grid
//! (maturity and tenor spacing), the numeraire index, the closed-form
//! correlation and volatility parameters, and an optional base seed for
//! reproducibility. All validation happens at build time, before any path
//! is simulated.

use crate::error::{ConfigError, MAX_PATHS, MAX_STEPS};
use lmm_core::correlation::CorrelationParams;
use lmm_core::volatility::VolatilityParams;

/// Relative tolerance when checking that maturity is a whole number of
/// tenor spacings.
const RATE_COUNT_TOLERANCE: f64 = 1e-9;

/// Immutable simulation configuration.
///
/// Use [`SimulationConfig::builder`] to construct instances; the builder
/// validates everything at build time and derives the live rate count from
/// `maturity / tenor_spacing − 1`.
///
/// # Examples
///
/// ```rust
/// use lmm_pricing::simulation::SimulationConfig;
/// use lmm_core::correlation::CorrelationParams;
/// use lmm_core::volatility::VolatilityParams;
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .n_steps(3)
///     .projection_years(0.75)
///     .maturity(1.0)
///     .tenor_spacing(0.25)
///     .correlation(CorrelationParams::new(0.99, 0.5, 0.5))
///     .volatility(VolatilityParams::new(0.19, 0.97, 0.08, 0.01))
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_rates(), 3);
/// assert_eq!(config.dt(), 0.25);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    n_paths: usize,
    n_steps: usize,
    projection_years: f64,
    maturity: f64,
    tenor_spacing: f64,
    numeraire: usize,
    correlation: CorrelationParams,
    volatility: VolatilityParams,
    seed: Option<u64>,
    /// Derived at build time from `maturity / tenor_spacing - 1`.
    n_rates: usize,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the simulated horizon in years.
    #[inline]
    pub fn projection_years(&self) -> f64 {
        self.projection_years
    }

    /// Returns the term-structure maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the forward-rate reset spacing τ in years.
    #[inline]
    pub fn tenor_spacing(&self) -> f64 {
        self.tenor_spacing
    }

    /// Returns the 1-based numeraire index.
    ///
    /// Index 1 is the spot (cascade) convention; `n_rates + 1` is the
    /// terminal measure.
    #[inline]
    pub fn numeraire(&self) -> usize {
        self.numeraire
    }

    /// Returns the correlation decay parameters.
    #[inline]
    pub fn correlation(&self) -> CorrelationParams {
        self.correlation
    }

    /// Returns the volatility shape parameters.
    #[inline]
    pub fn volatility(&self) -> VolatilityParams {
        self.volatility
    }

    /// Returns the optional base seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of live forward rates.
    #[inline]
    pub fn n_rates(&self) -> usize {
        self.n_rates
    }

    /// Returns the time-step length `projection_years / n_steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.projection_years / self.n_steps as f64
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    projection_years: Option<f64>,
    maturity: Option<f64>,
    tenor_spacing: Option<f64>,
    numeraire: Option<usize>,
    correlation: Option<CorrelationParams>,
    volatility: Option<VolatilityParams>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the simulated horizon in years.
    ///
    /// Defaults to the term-structure maturity when not set.
    #[inline]
    pub fn projection_years(mut self, projection_years: f64) -> Self {
        self.projection_years = Some(projection_years);
        self
    }

    /// Sets the term-structure maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the forward-rate reset spacing τ in years.
    #[inline]
    pub fn tenor_spacing(mut self, tenor_spacing: f64) -> Self {
        self.tenor_spacing = Some(tenor_spacing);
        self
    }

    /// Sets the 1-based numeraire index (default 1, the spot convention).
    #[inline]
    pub fn numeraire(mut self, numeraire: usize) -> Self {
        self.numeraire = Some(numeraire);
        self
    }

    /// Sets the correlation decay parameters.
    #[inline]
    pub fn correlation(mut self, correlation: CorrelationParams) -> Self {
        self.correlation = Some(correlation);
        self
    }

    /// Sets the volatility shape parameters.
    #[inline]
    pub fn volatility(mut self, volatility: VolatilityParams) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the base seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Fails fast on any inconsistent parameter: missing required fields,
    /// counts outside their caps, a maturity/spacing combination that does
    /// not yield a positive integral rate count, or a numeraire index
    /// outside `[1, n_rates + 1]`.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;
        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;
        let maturity = self.maturity.ok_or(ConfigError::InvalidParameter {
            name: "maturity",
            value: "must be specified".to_string(),
        })?;
        let tenor_spacing = self.tenor_spacing.ok_or(ConfigError::InvalidParameter {
            name: "tenor_spacing",
            value: "must be specified".to_string(),
        })?;
        let correlation = self.correlation.ok_or(ConfigError::InvalidParameter {
            name: "correlation",
            value: "must be specified".to_string(),
        })?;
        let volatility = self.volatility.ok_or(ConfigError::InvalidParameter {
            name: "volatility",
            value: "must be specified".to_string(),
        })?;
        let projection_years = self.projection_years.unwrap_or(maturity);
        let numeraire = self.numeraire.unwrap_or(1);

        if n_paths == 0 || n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(n_paths));
        }
        if n_steps == 0 || n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(n_steps));
        }
        if !projection_years.is_finite() || projection_years <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "projection_years",
                value: format!("must be finite and positive, got {projection_years}"),
            });
        }
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "maturity",
                value: format!("must be finite and positive, got {maturity}"),
            });
        }
        if !tenor_spacing.is_finite() || tenor_spacing <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "tenor_spacing",
                value: format!("must be finite and positive, got {tenor_spacing}"),
            });
        }

        // maturity / tau must be an integral number of resets, and the
        // rate count maturity/tau - 1 must be positive.
        let ratio = maturity / tenor_spacing;
        let rounded = ratio.round();
        if (ratio - rounded).abs() > RATE_COUNT_TOLERANCE * ratio.max(1.0) || rounded < 2.0 {
            return Err(ConfigError::InvalidRateCount {
                maturity,
                tau: tenor_spacing,
            });
        }
        let n_rates = rounded as usize - 1;

        if numeraire == 0 || numeraire > n_rates + 1 {
            return Err(ConfigError::InvalidNumeraire {
                numeraire,
                max: n_rates + 1,
            });
        }

        Ok(SimulationConfig {
            n_paths,
            n_steps,
            projection_years,
            maturity,
            tenor_spacing,
            numeraire,
            correlation,
            volatility,
            seed: self.seed,
            n_rates,
        })
    }
}
