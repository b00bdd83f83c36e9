//! Simulate command implementation.
//!
//! Runs the forward-rate simulation and prints per-rate terminal
//! statistics.

use serde::Serialize;
use tracing::info;

use crate::{CliError, Result};

use super::ModelArgs;

/// Terminal summary for one forward rate across all surviving paths.
#[derive(Debug, Serialize)]
struct RateSummary {
    rate_index: usize,
    initial: f64,
    terminal_mean: f64,
    terminal_std_dev: f64,
}

#[derive(Debug, Serialize)]
struct SimulateReport {
    n_paths: usize,
    failed_paths: usize,
    rates: Vec<RateSummary>,
}

/// Run the simulate command.
pub fn run(args: &ModelArgs, format: &str) -> Result<()> {
    let simulator = args.build_simulator()?;
    info!("Simulating {} paths over {} steps", args.paths, args.steps);

    let output = simulator.simulate()?;
    info!(
        "Simulation complete: {} paths, {} failed",
        output.n_paths(),
        output.failed_paths()
    );

    let report = summarise(&simulator, &output)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => print_table(&report),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    Ok(())
}

fn summarise(
    simulator: &lmm_pricing::ForwardRateSimulator,
    output: &lmm_pricing::SimulationOutput,
) -> Result<SimulateReport> {
    let n = output.n_paths();
    if n == 0 {
        return Err(CliError::AllPathsFailed {
            failed: output.failed_paths(),
        });
    }
    let n_rates = simulator.initial_rates().len();

    let rates = (0..n_rates)
        .map(|rate| {
            let terminals: Vec<f64> = output.paths().iter().map(|p| p.terminal(rate)).collect();
            let mean = terminals.iter().sum::<f64>() / n as f64;
            let var = terminals
                .iter()
                .map(|t| (t - mean) * (t - mean))
                .sum::<f64>()
                / (n - 1).max(1) as f64;
            RateSummary {
                rate_index: rate + 1,
                initial: simulator.initial_rates()[rate],
                terminal_mean: mean,
                terminal_std_dev: var.sqrt(),
            }
        })
        .collect();

    Ok(SimulateReport {
        n_paths: n,
        failed_paths: output.failed_paths(),
        rates,
    })
}

fn print_table(report: &SimulateReport) {
    println!(
        "\n{} paths simulated ({} failed)\n",
        report.n_paths, report.failed_paths
    );
    println!("┌───────┬────────────┬───────────────┬───────────────┐");
    println!("│ Rate  │ Initial    │ Terminal mean │ Terminal s.d. │");
    println!("├───────┼────────────┼───────────────┼───────────────┤");
    for rate in &report.rates {
        println!(
            "│ {:>5} │ {:>10.6} │ {:>13.6} │ {:>13.6} │",
            rate.rate_index, rate.initial, rate.terminal_mean, rate.terminal_std_dev
        );
    }
    println!("└───────┴────────────┴───────────────┴───────────────┘");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market;
    use lmm_core::correlation::CorrelationParams;
    use lmm_core::volatility::VolatilityParams;
    use lmm_pricing::simulation::{ForwardRateSimulator, SimulationConfig, SimulationOutput};

    fn reference_simulator(n_paths: usize) -> ForwardRateSimulator {
        let config = SimulationConfig::builder()
            .n_paths(n_paths)
            .n_steps(3)
            .projection_years(0.75)
            .maturity(1.0)
            .tenor_spacing(0.25)
            .correlation(CorrelationParams::new(0.99, 0.5, 0.5))
            .volatility(VolatilityParams::new(0.19, 0.97, 0.08, 0.01))
            .seed(42)
            .build()
            .unwrap();
        ForwardRateSimulator::new(config, &market::default_curve().unwrap()).unwrap()
    }

    #[test]
    fn test_summary_over_surviving_paths() {
        let simulator = reference_simulator(50);
        let output = simulator.simulate().unwrap();

        let report = summarise(&simulator, &output).unwrap();
        assert_eq!(report.n_paths, 50);
        assert_eq!(report.rates.len(), 3);
        for rate in &report.rates {
            assert!(rate.terminal_mean.is_finite());
            assert!(rate.terminal_std_dev.is_finite());
        }
    }

    #[test]
    fn test_all_paths_failed_reported_not_nan() {
        // An output with no surviving paths must surface as an error, not
        // as NaN statistics.
        let simulator = reference_simulator(10);
        let empty = SimulationOutput::new(vec![], 10);

        let err = summarise(&simulator, &empty).unwrap_err();
        assert!(matches!(err, CliError::AllPathsFailed { failed: 10 }));
    }
}
