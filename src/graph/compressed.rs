//! Frozen route graph stored as an incoming (pull-style) CSR

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An airport node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// External identifier (IATA code)
    pub code: String,

    /// Display name
    pub name: String,

    /// Dense position in 0..n, assigned in first-seen order
    pub position: usize,

    /// Sum of the weights of all routes leaving this airport
    pub out_weight: u32,
}

/// Immutable weighted directed graph of airports and routes
///
/// Edges are stored inverted: `offsets[i]..offsets[i+1]` spans the entries of
/// `sources`/`weights` describing routes *into* node `i`, sorted by origin
/// position. Rank computation pulls contributions along these entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteGraph {
    /// Node table indexed by position
    pub(crate) airports: Vec<Airport>,

    /// Mapping from airport codes to positions
    pub(crate) code_to_position: HashMap<String, usize>,

    /// Offset array into `sources`/`weights`, length n + 1
    pub(crate) offsets: Vec<u32>,

    /// Origin position of each incoming edge
    pub(crate) sources: Vec<u32>,

    /// Accumulated route count of each incoming edge
    pub(crate) weights: Vec<u32>,

    /// Positions with zero out-weight, ascending
    pub(crate) dangling: Vec<usize>,
}

impl RouteGraph {
    /// Number of airports
    pub fn node_count(&self) -> usize {
        self.airports.len()
    }

    /// Number of distinct (origin, destination) pairs
    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    /// Sum of all edge weights, i.e. the number of accepted routes
    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }

    /// All airports in position order
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Airport at `position`, if any
    pub fn airport(&self, position: usize) -> Option<&Airport> {
        self.airports.get(position)
    }

    /// Look up a position by airport code
    pub fn position(&self, code: &str) -> Option<usize> {
        self.code_to_position.get(code).copied()
    }

    /// Incoming edges of `node` as `(origin position, weight)` pairs
    pub fn incoming(&self, node: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        self.sources[start..end]
            .iter()
            .zip(&self.weights[start..end])
            .map(|(&origin, &weight)| (origin as usize, weight))
    }

    /// Number of distinct origins feeding `node`
    pub fn in_degree(&self, node: usize) -> usize {
        (self.offsets[node + 1] - self.offsets[node]) as usize
    }

    /// Out-weight of `node`
    pub fn out_weight(&self, node: usize) -> u32 {
        self.airports[node].out_weight
    }

    /// Dangling positions (zero out-weight)
    pub fn dangling(&self) -> &[usize] {
        &self.dangling
    }
}
