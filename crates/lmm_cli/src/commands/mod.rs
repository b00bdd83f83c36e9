//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command.

pub mod simulate;
pub mod validate;

use clap::Args;
use lmm_core::correlation::CorrelationParams;
use lmm_core::curve::RateCurve;
use lmm_core::volatility::VolatilityParams;
use lmm_pricing::simulation::{ForwardRateSimulator, SimulationConfig};

use crate::{market, Result};

/// Model and run parameters shared by all commands.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Number of Monte Carlo paths
    #[arg(short = 'p', long, default_value = "10000")]
    pub paths: usize,

    /// Number of time steps over the projection horizon
    #[arg(short = 's', long, default_value = "3")]
    pub steps: usize,

    /// Projection horizon in years
    #[arg(long, default_value = "0.75")]
    pub projection: f64,

    /// Term-structure maturity in years
    #[arg(short = 'm', long, default_value = "1.0")]
    pub maturity: f64,

    /// Forward-rate reset spacing in years
    #[arg(long, default_value = "0.25")]
    pub tau: f64,

    /// 1-based numeraire index (1 = spot measure)
    #[arg(short = 'n', long, default_value = "1")]
    pub numeraire: usize,

    /// Asymptotic correlation between distant rates
    #[arg(long, default_value = "0.99")]
    pub rho_inf: f64,

    /// Correlation decay speed with inter-rate distance
    #[arg(long, default_value = "0.5")]
    pub lambda: f64,

    /// Correlation decay damping with maturity
    #[arg(long, default_value = "0.5")]
    pub kappa: f64,

    /// Volatility hump slope
    #[arg(long, default_value = "0.19")]
    pub vol_a: f64,

    /// Volatility hump decay speed
    #[arg(long, default_value = "0.97")]
    pub vol_b: f64,

    /// Volatility long-maturity floor
    #[arg(long, default_value = "0.08")]
    pub vol_c: f64,

    /// Volatility short-maturity level
    #[arg(long, default_value = "0.01")]
    pub vol_d: f64,

    /// Base seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON curve file; built-in reference curve when omitted
    #[arg(long)]
    pub curve_file: Option<String>,
}

impl ModelArgs {
    /// Builds the validated simulation configuration.
    pub fn to_config(&self) -> Result<SimulationConfig> {
        let mut builder = SimulationConfig::builder()
            .n_paths(self.paths)
            .n_steps(self.steps)
            .projection_years(self.projection)
            .maturity(self.maturity)
            .tenor_spacing(self.tau)
            .numeraire(self.numeraire)
            .correlation(CorrelationParams::new(self.rho_inf, self.lambda, self.kappa))
            .volatility(VolatilityParams::new(
                self.vol_a, self.vol_b, self.vol_c, self.vol_d,
            ));
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build()?)
    }

    /// Loads the configured curve, or the built-in reference curve.
    pub fn load_curve(&self) -> Result<RateCurve> {
        match &self.curve_file {
            Some(path) => market::load_curve(path),
            None => market::default_curve(),
        }
    }

    /// Builds the simulator from the parsed arguments.
    pub fn build_simulator(&self) -> Result<ForwardRateSimulator> {
        let config = self.to_config()?;
        let curve = self.load_curve()?;
        Ok(ForwardRateSimulator::new(config, &curve)?)
    }
}
