//! Simulation output containers.
//!
//! A [`PathMatrix`] records one path's full rate trajectory, written once,
//! step by step, during evolution and never mutated afterwards. A
//! [`SimulationOutput`] collects the completed paths of a run together
//! with the count of paths that failed on a numerical anomaly.

/// One path's recorded rate trajectory, `[n_rates × n_steps]`.
///
/// Stored rate-major: entry `(rate, step)` is the level of forward rate
/// `rate` (0-based) after step `step` has been applied.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    n_rates: usize,
    n_steps: usize,
    data: Vec<f64>,
}

impl PathMatrix {
    pub(crate) fn new(n_rates: usize, n_steps: usize) -> Self {
        Self {
            n_rates,
            n_steps,
            data: vec![0.0; n_rates * n_steps],
        }
    }

    /// Records the full rate vector after one step.
    pub(crate) fn record_step(&mut self, step: usize, rates: &[f64]) {
        debug_assert_eq!(rates.len(), self.n_rates);
        for (rate, &value) in rates.iter().enumerate() {
            self.data[rate * self.n_steps + step] = value;
        }
    }

    /// Returns the number of recorded rates.
    #[inline]
    pub fn n_rates(&self) -> usize {
        self.n_rates
    }

    /// Returns the number of recorded steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the level of forward rate `rate` (0-based) after `step`.
    ///
    /// # Panics
    ///
    /// Debug builds assert both indices are in range.
    #[inline]
    pub fn get(&self, rate: usize, step: usize) -> f64 {
        debug_assert!(rate < self.n_rates, "rate index out of range");
        debug_assert!(step < self.n_steps, "step index out of range");
        self.data[rate * self.n_steps + step]
    }

    /// Returns the terminal level of forward rate `rate` (0-based).
    #[inline]
    pub fn terminal(&self, rate: usize) -> f64 {
        self.get(rate, self.n_steps - 1)
    }
}

/// The durable result of one simulation run.
///
/// Owned by the caller and read-only once produced. Paths that hit a
/// numerical anomaly (a non-finite rate) are dropped whole and only
/// counted; partial trajectories are never surfaced.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutput {
    paths: Vec<PathMatrix>,
    failed_paths: usize,
}

impl SimulationOutput {
    /// Assembles an output from completed paths and a failed-path count.
    ///
    /// The paths vector may be empty when every path failed; consumers
    /// must check [`n_paths`](Self::n_paths) before computing statistics.
    pub fn new(paths: Vec<PathMatrix>, failed_paths: usize) -> Self {
        Self {
            paths,
            failed_paths,
        }
    }

    /// Returns the completed paths.
    #[inline]
    pub fn paths(&self) -> &[PathMatrix] {
        &self.paths
    }

    /// Returns the number of completed paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }

    /// Returns the number of paths that failed on a numerical anomaly.
    #[inline]
    pub fn failed_paths(&self) -> usize {
        self.failed_paths
    }
}
