//! Route table ingestion

use crate::data::{open_input, strip_quotes};
use crate::graph::GraphBuilder;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::BufRead;

const ORIGIN_FIELD: usize = 2;
const DESTINATION_FIELD: usize = 4;

/// Counters collected while reading the route table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouteStats {
    /// Non-empty rows read
    pub rows: usize,
    /// Routes added to the graph
    pub accepted: usize,
    /// Rows with too few fields
    pub malformed: usize,
    /// Rows naming an airport that is not in the graph
    pub unknown_reference: usize,
}

/// Load routes from a file into `builder`
///
/// Airports must already be loaded; routes to unknown codes are dropped.
pub fn load_routes(path: &str, builder: &mut GraphBuilder) -> Result<RouteStats> {
    log::info!("Reading route file from {}", path);

    let reader = open_input(path)?;
    let stats = read_routes(reader, builder).with_context(|| format!("reading {path}"))?;

    log::info!("{} valid routes found", stats.accepted);
    if stats.unknown_reference > 0 {
        log::debug!(
            "Skipped {} routes referencing unknown airports",
            stats.unknown_reference
        );
    }

    Ok(stats)
}

/// Read route rows from any buffered source into `builder`
pub fn read_routes<R: BufRead>(reader: R, builder: &mut GraphBuilder) -> Result<RouteStats> {
    let mut stats = RouteStats::default();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.rows += 1;

        let terms: Vec<&str> = line.split(',').collect();
        if terms.len() <= DESTINATION_FIELD {
            stats.malformed += 1;
            continue;
        }

        let origin = strip_quotes(terms[ORIGIN_FIELD]);
        let destination = strip_quotes(terms[DESTINATION_FIELD]);

        if builder.add_route(origin, destination) {
            stats.accepted += 1;
        } else {
            stats.unknown_reference += 1;
        }
    }

    Ok(stats)
}
