//! Configuration management for the PageRank solver

use crate::error::GraphError;

/// Default cap on power iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default per-element convergence threshold
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-12;

/// Solver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of power iterations before giving up
    pub max_iterations: usize,

    /// Maximum allowed per-element change between successive rank vectors
    pub convergence_threshold: f64,

    /// Compute each iteration's node updates on the rayon pool
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            parallel: false,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with custom values
    pub fn new(max_iterations: usize, convergence_threshold: f64, parallel: bool) -> Self {
        Self {
            max_iterations,
            convergence_threshold,
            parallel,
        }
    }

    /// Reject parameters the solver cannot work with
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.max_iterations == 0 {
            return Err(GraphError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "convergence_threshold must be a finite non-negative number, got {}",
                self.convergence_threshold
            )));
        }

        Ok(())
    }
}
