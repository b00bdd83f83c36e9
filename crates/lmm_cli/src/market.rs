//! Market data loading for the CLI.

use lmm_core::curve::RateCurve;
use serde::Deserialize;

use crate::{CliError, Result};

/// On-disk curve file layout: parallel tenor and rate arrays.
#[derive(Debug, Deserialize)]
struct CurveFile {
    tenors: Vec<f64>,
    rates: Vec<f64>,
}

/// Loads a zero curve from a JSON file.
pub fn load_curve(path: &str) -> Result<RateCurve> {
    if !std::path::Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    let file: CurveFile = serde_json::from_str(&contents)?;
    Ok(RateCurve::new(&file.tenors, &file.rates)?)
}

/// The built-in reference zero curve, 12 pillars out to 30 years.
pub fn default_curve() -> Result<RateCurve> {
    Ok(RateCurve::new(
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
    )?)
}
