//! PageRank computation

pub mod convergence;
pub mod solver;

pub use convergence::{check_rank_sum, has_converged, max_delta, RANK_SUM_TOLERANCE};
pub use solver::{PageRankSolver, RankOutcome, SolverState};

/// Probability of following a route rather than teleporting
pub const DAMPING_FACTOR: f64 = 0.85;
