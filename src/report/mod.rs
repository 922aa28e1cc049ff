//! Ranked report and run summary output

use crate::data::{AirportStats, RouteStats};
use crate::graph::RouteGraph;
use crate::rank::RankOutcome;
use anyhow::{anyhow, Result};
use itertools::Itertools;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Duration;

/// Width the airport name is padded to in report lines
pub const NAME_WIDTH: usize = 50;

/// Number of airports listed in the JSON summary
const SUMMARY_TOP_N: usize = 10;

/// One line of the final ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAirport {
    /// 1-based place in the ranking
    pub rank: usize,
    pub code: String,
    pub name: String,
    /// Position in the graph's node table
    pub position: usize,
    pub value: f64,
}

/// Sort airports by rank value, highest first
///
/// Equal values keep ingestion order (ascending position).
pub fn rank_airports(graph: &RouteGraph, ranks: &[f64]) -> Result<Vec<RankedAirport>> {
    if ranks.len() != graph.node_count() {
        return Err(anyhow!(
            "rank vector has {} entries but graph has {} airports",
            ranks.len(),
            graph.node_count()
        ));
    }

    let ranked = graph
        .airports()
        .iter()
        .zip(ranks)
        .sorted_by(|(_, a), (_, b)| b.total_cmp(a))
        .enumerate()
        .map(|(i, (airport, &value))| RankedAirport {
            rank: i + 1,
            code: airport.code.clone(),
            name: airport.name.clone(),
            position: airport.position,
            value,
        })
        .collect();

    Ok(ranked)
}

/// Render one report line: `<rank>: <code> - <padded name> <value>`
pub fn format_line(entry: &RankedAirport) -> String {
    format!(
        "{:<4} {} - {:·<width$} {}",
        format!("{}:", entry.rank),
        entry.code,
        entry.name,
        entry.value,
        width = NAME_WIDTH
    )
}

/// Write the ranking to `path`, echoing each line to the log
pub fn write_report(entries: &[RankedAirport], path: &str) -> Result<()> {
    log::info!("Writing ranking of {} airports to {}", entries.len(), path);

    let banner = "-".repeat(NAME_WIDTH);
    let mut writer = BufWriter::new(File::create(path)?);

    log::info!("{}", banner);
    for entry in entries {
        let line = format_line(entry);
        log::info!("{}", line);
        writeln!(writer, "{}", line)?;
    }
    log::info!("{}", banner);

    writer.flush()?;
    Ok(())
}

/// Save a JSON summary of the run
pub fn save_summary(
    path: &str,
    graph: &RouteGraph,
    airport_stats: &AirportStats,
    route_stats: &RouteStats,
    outcome: &RankOutcome,
    ranked: &[RankedAirport],
    elapsed: Duration,
) -> Result<()> {
    log::info!("Saving run summary to {}", path);

    let mut file = File::create(path)?;

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "route_count": graph.total_weight(),
            "dangling_count": graph.dangling().len(),
        },
        "ingestion": {
            "airports": airport_stats,
            "routes": route_stats,
        },
        "solver": {
            "state": outcome.state,
            "converged": outcome.converged(),
            "iterations": outcome.iterations,
            "max_delta": outcome.max_delta,
            "elapsed_seconds": elapsed.as_secs_f64(),
        },
        "top_airports": ranked.iter().take(SUMMARY_TOP_N).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
