//! Convergence and invariant checks on rank vectors

use crate::error::GraphError;

/// Allowed deviation of a rank vector's sum from 1
pub const RANK_SUM_TOLERANCE: f64 = 1e-9;

/// Largest absolute element-wise difference between two rank vectors
pub fn max_delta(previous: &[f64], next: &[f64]) -> f64 {
    previous
        .iter()
        .zip(next)
        .map(|(p, q)| (p - q).abs())
        .fold(0.0, f64::max)
}

/// True iff no element moved by more than `threshold`
pub fn has_converged(previous: &[f64], next: &[f64], threshold: f64) -> bool {
    previous
        .iter()
        .zip(next)
        .all(|(p, q)| (p - q).abs() <= threshold)
}

/// Verify that `ranks` is a probability distribution, returning its sum
///
/// `stage` names the solver phase in the error ("before" / "after").
pub fn check_rank_sum(ranks: &[f64], stage: &'static str) -> Result<f64, GraphError> {
    let sum: f64 = ranks.iter().sum();
    if (sum - 1.0).abs() > RANK_SUM_TOLERANCE || !sum.is_finite() {
        return Err(GraphError::RankSumInvariant { stage, sum });
    }
    Ok(sum)
}
