//! Dangling node detection

use crate::graph::compressed::Airport;

/// Positions of every airport without outgoing routes, in ascending order
///
/// Rank mass sitting on these nodes has nowhere to flow, so the solver
/// redistributes it uniformly each iteration.
pub fn compute_dangling_set(airports: &[Airport]) -> Vec<usize> {
    airports
        .iter()
        .filter(|airport| airport.out_weight == 0)
        .map(|airport| airport.position)
        .collect()
}
