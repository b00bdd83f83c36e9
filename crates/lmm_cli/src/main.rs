//! lmm - Command Line Front End for the Forward-Rate Simulation Engine
//!
//! # Commands
//!
//! - `lmm simulate` - Run the Monte Carlo simulation and print terminal
//!   rate statistics
//! - `lmm validate` - Run the simulation and back-test the terminal
//!   variance of one rate against its model-implied target
//!
//! All model parameters default to the built-in reference scenario; pass
//! `--seed` for reproducible output and `--curve-file` to supply a JSON
//! zero curve.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod market;

pub use error::{CliError, Result};

/// Forward-rate Monte Carlo simulation CLI
#[derive(Parser)]
#[command(name = "lmm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and print terminal rate statistics
    Simulate {
        #[command(flatten)]
        model: commands::ModelArgs,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Run the simulation and back-test one rate's terminal variance
    Validate {
        #[command(flatten)]
        model: commands::ModelArgs,

        /// 1-based index of the rate to back-test
        #[arg(short, long, default_value = "3")]
        rate_index: usize,

        /// Volatility indices accumulated into the target, one per step
        #[arg(short, long, value_delimiter = ',', default_value = "3,3,3")]
        check_tenors: Vec<usize>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Simulate { model, format } => commands::simulate::run(&model, &format),
        Commands::Validate {
            model,
            rate_index,
            check_tenors,
            format,
        } => commands::validate::run(&model, rate_index, &check_tenors, &format),
    }
}
