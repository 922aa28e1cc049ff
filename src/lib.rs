//! PageRank centrality of airports in a flight-route network

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod rank;
pub mod report;

pub use config::SolverConfig;
pub use error::GraphError;
pub use graph::{Airport, GraphBuilder, RouteGraph};
pub use rank::{PageRankSolver, RankOutcome, SolverState, DAMPING_FACTOR};

pub use anyhow::{anyhow, Result};
