use airport_pagerank::config::{DEFAULT_CONVERGENCE_THRESHOLD, DEFAULT_MAX_ITERATIONS};
use airport_pagerank::{data, report, GraphBuilder, PageRankSolver, SolverConfig};
use anyhow::Result;
use clap::Parser;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(
    name = "airport-pagerank",
    about = "PageRank centrality of airports in a flight-route network"
)]
struct Cli {
    /// Path to the airport table
    #[clap(long, default_value = "airports.txt")]
    airports: String,

    /// Path to the route table
    #[clap(long, default_value = "routes.txt")]
    routes: String,

    /// Output path for the ranked report
    #[clap(long, default_value = "output.txt")]
    output: String,

    /// Optional path for a JSON run summary
    #[clap(long)]
    summary: Option<String>,

    /// Maximum number of power iterations
    #[clap(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Per-airport convergence threshold
    #[clap(long, default_value_t = DEFAULT_CONVERGENCE_THRESHOLD)]
    threshold: f64,

    /// Update ranks in parallel within each iteration
    #[clap(long)]
    parallel: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    if args.parallel {
        let num_threads = if args.threads > 0 {
            args.threads
        } else {
            num_cpus::get()
        };

        log::info!("Using {} worker threads", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    let config = SolverConfig::new(args.max_iterations, args.threshold, args.parallel);
    config.validate()?;

    // 1. Load data
    let mut builder = GraphBuilder::new();
    let airport_stats = data::load_airports(&args.airports, &mut builder)?;
    let route_stats = data::load_routes(&args.routes, &mut builder)?;

    let graph = builder.build();
    log::info!(
        "{} dangling airports with no outgoing flights",
        graph.dangling().len()
    );

    // 2. Rank
    let started = Instant::now();
    let outcome = PageRankSolver::new(&graph, config).solve()?;
    let elapsed = started.elapsed();

    // 3. Report
    let ranked = report::rank_airports(&graph, &outcome.ranks)?;
    report::write_report(&ranked, &args.output)?;

    if let Some(path) = &args.summary {
        report::save_summary(
            path,
            &graph,
            &airport_stats,
            &route_stats,
            &outcome,
            &ranked,
            elapsed,
        )?;
    }

    if outcome.converged() {
        log::info!("Iterations: {}", outcome.iterations);
    } else {
        log::warn!(
            "Result did NOT converge: stopped after {} iterations (max delta {:e})",
            outcome.iterations,
            outcome.max_delta
        );
    }
    log::info!("Time of PageRank computation: {:?}", elapsed);

    Ok(())
}
