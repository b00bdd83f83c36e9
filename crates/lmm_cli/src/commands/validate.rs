//! Validate command implementation.
//!
//! Runs the simulation and back-tests the terminal variance of one rate
//! against its model-implied target.

use tracing::info;

use crate::{CliError, Result};
use lmm_pricing::validate::{VarianceReport, VarianceValidator};

use super::ModelArgs;

/// Run the validate command.
pub fn run(args: &ModelArgs, rate_index: usize, check_tenors: &[usize], format: &str) -> Result<()> {
    let config = args.to_config()?;
    let dt = config.dt();
    let curve = args.load_curve()?;
    let simulator = lmm_pricing::ForwardRateSimulator::new(config, &curve)?;

    info!(
        "Back-testing rate {} over tenors {:?} with {} paths",
        rate_index, check_tenors, args.paths
    );
    let output = simulator.simulate()?;

    let validator = VarianceValidator::new(rate_index, check_tenors.to_vec());
    let report = validator.validate(&output, simulator.volatility(), dt)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => print_report(rate_index, &report),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    Ok(())
}

fn print_report(rate_index: usize, report: &VarianceReport) {
    println!("\nVariance back-test for rate {}\n", rate_index);
    println!("  calculated variance : {:.10}", report.calculated_variance);
    println!("  target variance     : {:.10}", report.target_variance);
    println!("  absolute error      : {:.10}", report.absolute_error);
    println!("  relative error      : {:+.4}%", report.relative_error * 100.0);
    println!("  test statistic      : {:.4}", report.test_statistic);
    println!("  degrees of freedom  : {}", report.degrees_of_freedom);
}
