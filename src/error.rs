//! Error types for graph construction and rank computation

use thiserror::Error;

/// Failures raised by the graph store and the PageRank solver
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// The solver was asked to rank a graph with no nodes
    #[error("cannot rank an empty graph (0 nodes)")]
    EmptyGraph,

    /// An edge referenced a position that was never allocated
    #[error("invalid node position {position} (graph has {node_count} nodes)")]
    InvalidPosition { position: usize, node_count: usize },

    /// A starting rank vector does not match the node count
    #[error("rank vector has {actual} entries, expected {expected}")]
    RankLengthMismatch { expected: usize, actual: usize },

    /// The ranks stopped summing to 1; indicates a logic defect
    #[error("rank sum invariant violated {stage} solving: sum = {sum}")]
    RankSumInvariant { stage: &'static str, sum: f64 },

    /// Solver parameters outside their valid range
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
