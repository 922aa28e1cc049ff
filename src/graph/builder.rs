//! Graph construction module

use crate::error::GraphError;
use crate::graph::compressed::{Airport, RouteGraph};
use crate::graph::dangling::compute_dangling_set;
use std::collections::HashMap;

/// Builder for incrementally constructing a RouteGraph during ingestion
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from airport codes to node positions
    code_to_position: HashMap<String, usize>,

    /// Node table indexed by position
    airports: Vec<Airport>,

    /// Per-destination map of origin position to accumulated route count
    incoming: Vec<HashMap<usize, u32>>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for `code`
    ///
    /// A code seen before keeps its first position and name.
    pub fn add_node(&mut self, code: &str, name: &str) -> usize {
        if let Some(&position) = self.code_to_position.get(code) {
            return position;
        }

        let position = self.airports.len();
        self.code_to_position.insert(code.to_string(), position);
        self.airports.push(Airport {
            code: code.to_string(),
            name: name.to_string(),
            position,
            out_weight: 0,
        });
        self.incoming.push(HashMap::new());

        position
    }

    /// Add one route from `origin` to `destination`
    ///
    /// Repeated routes accumulate weight on the same edge.
    pub fn add_edge(&mut self, origin: usize, destination: usize) -> Result<(), GraphError> {
        let node_count = self.airports.len();
        for position in [origin, destination] {
            if position >= node_count {
                return Err(GraphError::InvalidPosition {
                    position,
                    node_count,
                });
            }
        }

        *self.incoming[destination].entry(origin).or_insert(0) += 1;
        self.airports[origin].out_weight += 1;

        Ok(())
    }

    /// Add a route by airport codes, returning `false` if either code is unknown
    pub fn add_route(&mut self, origin_code: &str, destination_code: &str) -> bool {
        match (self.position(origin_code), self.position(destination_code)) {
            (Some(origin), Some(destination)) => self.add_edge(origin, destination).is_ok(),
            _ => false,
        }
    }

    /// Look up a position by airport code
    pub fn position(&self, code: &str) -> Option<usize> {
        self.code_to_position.get(code).copied()
    }

    /// Number of nodes added so far
    pub fn node_count(&self) -> usize {
        self.airports.len()
    }

    /// Current weight of the edge `origin -> destination` (0 if absent)
    pub fn edge_weight(&self, origin: usize, destination: usize) -> u32 {
        self.incoming
            .get(destination)
            .and_then(|edges| edges.get(&origin))
            .copied()
            .unwrap_or(0)
    }

    /// Freeze into a RouteGraph and compute its dangling set
    pub fn build(self) -> RouteGraph {
        let edge_count: usize = self.incoming.iter().map(HashMap::len).sum();

        let mut offsets = Vec::with_capacity(self.airports.len() + 1);
        let mut sources = Vec::with_capacity(edge_count);
        let mut weights = Vec::with_capacity(edge_count);
        offsets.push(0);

        for edges in &self.incoming {
            // Sort by origin so summation order is reproducible
            let mut sorted: Vec<(usize, u32)> = edges.iter().map(|(&o, &w)| (o, w)).collect();
            sorted.sort_unstable_by_key(|&(origin, _)| origin);

            for (origin, weight) in sorted {
                sources.push(origin as u32);
                weights.push(weight);
            }
            offsets.push(sources.len() as u32);
        }

        let dangling = compute_dangling_set(&self.airports);

        log::debug!(
            "Built route graph: {} airports, {} edges, {} dangling",
            self.airports.len(),
            edge_count,
            dangling.len()
        );

        RouteGraph {
            airports: self.airports,
            code_to_position: self.code_to_position,
            offsets,
            sources,
            weights,
            dangling,
        }
    }
}
