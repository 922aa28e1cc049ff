//! Power-iteration PageRank solver
//!
//! Each iteration reads a frozen snapshot `P` and writes a fresh vector `Q`:
//!
//! ```text
//! dangling_mass = Σ P[j] for dangling j / n
//! Q[i] = d * (Σ P[o] * w(o→i) / out_weight(o) + dangling_mass) + (1 - d) / n
//! ```
//!
//! The sum runs over the incoming edges of `i`, and both the rank and the
//! out-weight are read at the edge's origin `o`.

use crate::config::SolverConfig;
use crate::error::GraphError;
use crate::graph::RouteGraph;
use crate::rank::convergence::{check_rank_sum, has_converged, max_delta};
use crate::rank::DAMPING_FACTOR;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverState {
    /// Rank vector set, no iteration run yet
    Initialized,
    /// Power iteration in progress
    Iterating,
    /// Successive vectors agreed within the threshold
    Converged,
    /// The iteration cap was hit first; the last vector is still returned
    IterationLimitReached,
}

/// Result of a solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankOutcome {
    /// Final rank vector, indexed by node position
    pub ranks: Vec<f64>,

    /// Number of iterations performed
    pub iterations: usize,

    /// Terminal state
    pub state: SolverState,

    /// Largest element change in the last iteration
    pub max_delta: f64,
}

impl RankOutcome {
    /// Whether the result formally converged
    pub fn converged(&self) -> bool {
        self.state == SolverState::Converged
    }
}

/// PageRank solver over a frozen route graph
pub struct PageRankSolver<'g> {
    graph: &'g RouteGraph,
    config: SolverConfig,
}

impl<'g> PageRankSolver<'g> {
    /// Create a solver for `graph`
    pub fn new(graph: &'g RouteGraph, config: SolverConfig) -> Self {
        Self { graph, config }
    }

    /// Solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve starting from the uniform distribution 1/n
    pub fn solve(&self) -> Result<RankOutcome, GraphError> {
        let n = self.graph.node_count();
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        self.solve_from(vec![1.0 / n as f64; n])
    }

    /// Solve starting from a caller-supplied rank vector
    pub fn solve_from(&self, initial: Vec<f64>) -> Result<RankOutcome, GraphError> {
        self.config.validate()?;

        let n = self.graph.node_count();
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if initial.len() != n {
            return Err(GraphError::RankLengthMismatch {
                expected: n,
                actual: initial.len(),
            });
        }
        check_rank_sum(&initial, "before")?;

        let mut state = SolverState::Initialized;
        log::debug!(
            "Solver {:?}: {} nodes, {} dangling, cap {} iterations, threshold {:e}",
            state,
            n,
            self.graph.dangling().len(),
            self.config.max_iterations,
            self.config.convergence_threshold
        );

        let mut current = initial;
        let mut next = vec![0.0; n];
        let mut iterations = 0;

        state = SolverState::Iterating;
        while iterations < self.config.max_iterations {
            self.step(&current, &mut next);
            iterations += 1;

            let converged = has_converged(&current, &next, self.config.convergence_threshold);
            std::mem::swap(&mut current, &mut next);

            if converged {
                state = SolverState::Converged;
                break;
            }
        }

        if state == SolverState::Iterating {
            state = SolverState::IterationLimitReached;
        }

        // After the swap `next` holds the previous snapshot
        let delta = max_delta(&next, &current);
        check_rank_sum(&current, "after")?;

        match state {
            SolverState::Converged => {
                log::info!("PageRank converged after {} iterations", iterations)
            }
            _ => log::warn!(
                "PageRank did not converge within {} iterations (max delta {:e})",
                iterations,
                delta
            ),
        }

        Ok(RankOutcome {
            ranks: current,
            iterations,
            state,
            max_delta: delta,
        })
    }

    /// Compute one iteration from `current` without touching it
    ///
    /// `current` must hold one entry per node.
    pub fn next_ranks(&self, current: &[f64]) -> Vec<f64> {
        let mut next = vec![0.0; current.len()];
        self.step(current, &mut next);
        next
    }

    fn step(&self, current: &[f64], next: &mut [f64]) {
        let n = current.len() as f64;
        let dangling_mass = self
            .graph
            .dangling()
            .iter()
            .map(|&node| current[node])
            .sum::<f64>()
            / n;
        let teleport = (1.0 - DAMPING_FACTOR) / n;

        if self.config.parallel {
            next.par_iter_mut().enumerate().for_each(|(node, slot)| {
                *slot = self.pull_rank(node, current, dangling_mass, teleport);
            });
        } else {
            for (node, slot) in next.iter_mut().enumerate() {
                *slot = self.pull_rank(node, current, dangling_mass, teleport);
            }
        }
    }

    #[inline]
    fn pull_rank(&self, node: usize, current: &[f64], dangling_mass: f64, teleport: f64) -> f64 {
        let incoming: f64 = self
            .graph
            .incoming(node)
            .map(|(origin, weight)| {
                current[origin] * f64::from(weight) / f64::from(self.graph.out_weight(origin))
            })
            .sum();

        DAMPING_FACTOR * (incoming + dangling_mass) + teleport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn graph(codes: &[&str], routes: &[(&str, &str)]) -> RouteGraph {
        let mut builder = GraphBuilder::new();
        for code in codes {
            builder.add_node(code, &format!("{code} International"));
        }
        for (origin, destination) in routes {
            assert!(builder.add_route(origin, destination));
        }
        builder.build()
    }

    fn tight() -> SolverConfig {
        SolverConfig::new(1000, 1e-14, false)
    }

    #[test]
    fn test_empty_graph_is_rejected() {
        let graph = GraphBuilder::new().build();
        let err = PageRankSolver::new(&graph, tight()).solve().unwrap_err();
        assert_eq!(err, GraphError::EmptyGraph);
    }

    #[test]
    fn test_single_isolated_node_gets_all_rank() {
        let graph = graph(&["AAA"], &[]);
        let outcome = PageRankSolver::new(&graph, tight()).solve().unwrap();

        assert!(outcome.converged());
        assert_eq!(outcome.iterations, 1);
        assert!((outcome.ranks[0] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_symmetric_cycle_is_uniform() {
        let graph = graph(
            &["AAA", "BBB", "CCC"],
            &[("AAA", "BBB"), ("BBB", "CCC"), ("CCC", "AAA")],
        );
        let outcome = PageRankSolver::new(&graph, tight()).solve().unwrap();

        assert!(outcome.converged());
        for rank in &outcome.ranks {
            assert!((rank - 1.0 / 3.0).abs() < 1e-12, "rank = {rank}");
        }
    }

    #[test]
    fn test_two_nodes_with_dangling_destination() {
        // A -> B, B dangling. Fixed point with d = 0.85, n = 2:
        //   a = d * b / 2 + (1 - d) / 2,  a + b = 1
        //   => a = 0.5 / (1 + d / 2)
        let graph = graph(&["AAA", "BBB"], &[("AAA", "BBB")]);
        let outcome = PageRankSolver::new(&graph, tight()).solve().unwrap();

        let expected_a = 0.5 / (1.0 + DAMPING_FACTOR / 2.0);
        let expected_b = 1.0 - expected_a;

        assert!(outcome.converged());
        assert!((outcome.ranks[0] - expected_a).abs() < 1e-10);
        assert!((outcome.ranks[1] - expected_b).abs() < 1e-10);
        assert!(outcome.ranks[0] < outcome.ranks[1]);
    }

    #[test]
    fn test_multi_origin_destination_reads_origin_rank() {
        // A -> B, A -> C, B -> C; C is dangling and fed by two distinct origins
        let graph = graph(
            &["AAA", "BBB", "CCC"],
            &[("AAA", "BBB"), ("AAA", "CCC"), ("BBB", "CCC")],
        );
        let solver = PageRankSolver::new(&graph, tight());
        let current = vec![0.5, 0.3, 0.2];
        let next = solver.next_ranks(&current);

        let dangling = 0.2 / 3.0;
        let teleport = (1.0 - DAMPING_FACTOR) / 3.0;
        let expected = [
            DAMPING_FACTOR * dangling + teleport,
            DAMPING_FACTOR * (0.5 / 2.0 + dangling) + teleport,
            DAMPING_FACTOR * (0.5 / 2.0 + 0.3 / 1.0 + dangling) + teleport,
        ];

        for (got, want) in next.iter().zip(expected) {
            assert!((got - want).abs() < 1e-15, "got {got}, want {want}");
        }
        assert!((next.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_edge_weight_scales_contribution() {
        // A sends two routes to B and one to C
        let graph = graph(
            &["AAA", "BBB", "CCC"],
            &[("AAA", "BBB"), ("AAA", "BBB"), ("AAA", "CCC")],
        );
        let solver = PageRankSolver::new(&graph, tight());
        let next = solver.next_ranks(&[0.6, 0.2, 0.2]);

        let dangling = 0.4 / 3.0;
        let teleport = (1.0 - DAMPING_FACTOR) / 3.0;
        let expected_b = DAMPING_FACTOR * (0.6 * 2.0 / 3.0 + dangling) + teleport;
        let expected_c = DAMPING_FACTOR * (0.6 * 1.0 / 3.0 + dangling) + teleport;

        assert!((next[1] - expected_b).abs() < 1e-15);
        assert!((next[2] - expected_c).abs() < 1e-15);
    }

    #[test]
    fn test_iteration_limit_returns_last_vector() {
        let graph = graph(
            &["AAA", "BBB", "CCC"],
            &[("AAA", "BBB"), ("AAA", "CCC"), ("BBB", "CCC")],
        );
        let outcome = PageRankSolver::new(&graph, SolverConfig::new(2, 0.0, false))
            .solve()
            .unwrap();

        assert_eq!(outcome.state, SolverState::IterationLimitReached);
        assert!(!outcome.converged());
        assert_eq!(outcome.iterations, 2);
        assert!(outcome.max_delta > 0.0);
        assert!((outcome.ranks.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_restart_from_converged_output() {
        // Error contracts by a real factor of d / 2 per step on this graph
        let graph = graph(&["AAA", "BBB"], &[("AAA", "BBB")]);
        let solver = PageRankSolver::new(&graph, SolverConfig::new(1000, 1e-12, false));
        let first = solver.solve().unwrap();
        assert!(first.converged());

        let again = solver.solve_from(first.ranks.clone()).unwrap();
        assert!(again.converged());
        assert!(again.iterations <= 1);
    }

    #[test]
    fn test_solve_from_validates_input() {
        let graph = graph(&["AAA", "BBB"], &[("AAA", "BBB")]);
        let solver = PageRankSolver::new(&graph, tight());

        assert_eq!(
            solver.solve_from(vec![1.0]).unwrap_err(),
            GraphError::RankLengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(matches!(
            solver.solve_from(vec![0.2, 0.2]),
            Err(GraphError::RankSumInvariant { stage: "before", .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let graph = graph(&["AAA"], &[]);
        let solver = PageRankSolver::new(&graph, SolverConfig::new(0, 1e-9, false));
        assert!(matches!(solver.solve(), Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let codes: Vec<String> = (0..40).map(|i| format!("N{i:02}")).collect();
        let mut builder = GraphBuilder::new();
        for code in &codes {
            builder.add_node(code, code);
        }
        for i in 0..40 {
            builder.add_edge(i, (i * 7 + 3) % 40).unwrap();
            if i % 3 == 0 {
                builder.add_edge(i, (i + 1) % 40).unwrap();
            }
        }
        let graph = builder.build();

        let sequential = PageRankSolver::new(&graph, SolverConfig::new(500, 1e-13, false))
            .solve()
            .unwrap();
        let parallel = PageRankSolver::new(&graph, SolverConfig::new(500, 1e-13, true))
            .solve()
            .unwrap();

        assert_eq!(sequential.iterations, parallel.iterations);
        assert_eq!(sequential.ranks, parallel.ranks);
    }
}
