//! Airport table ingestion
//!
//! Rows are split naively on commas. Field 1 holds the quoted display name and
//! field 4 the quoted IATA code; a row only yields an airport when that raw
//! field is exactly five characters long (`"GKA"`), which filters out `\N`
//! placeholders and ICAO-only rows.

use crate::data::{open_input, strip_quotes};
use crate::graph::GraphBuilder;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::BufRead;

const NAME_FIELD: usize = 1;
const CODE_FIELD: usize = 4;
const QUOTED_CODE_LEN: usize = 5;

/// Counters collected while reading the airport table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AirportStats {
    /// Non-empty rows read
    pub rows: usize,
    /// Airports added to the graph
    pub accepted: usize,
    /// Rows with too few fields
    pub malformed: usize,
    /// Rows whose code field failed the length filter
    pub invalid_code: usize,
    /// Rows repeating an already-seen code
    pub duplicates: usize,
}

/// Load airports from a file into `builder`
pub fn load_airports(path: &str, builder: &mut GraphBuilder) -> Result<AirportStats> {
    log::info!("Reading airport file from {}", path);

    let reader = open_input(path)?;
    let stats = read_airports(reader, builder).with_context(|| format!("reading {path}"))?;

    log::info!("{} airports with a valid IATA code found", stats.accepted);
    log::debug!("Airport ingestion stats: {:?}", stats);

    Ok(stats)
}

/// Read airport rows from any buffered source into `builder`
pub fn read_airports<R: BufRead>(reader: R, builder: &mut GraphBuilder) -> Result<AirportStats> {
    let mut stats = AirportStats::default();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.rows += 1;

        let terms: Vec<&str> = line.split(',').collect();
        if terms.len() <= CODE_FIELD {
            stats.malformed += 1;
            continue;
        }

        let raw_code = terms[CODE_FIELD];
        if raw_code.chars().count() != QUOTED_CODE_LEN {
            stats.invalid_code += 1;
            continue;
        }

        let code = strip_quotes(raw_code);
        if builder.position(code).is_some() {
            stats.duplicates += 1;
            continue;
        }

        builder.add_node(code, strip_quotes(terms[NAME_FIELD]));
        stats.accepted += 1;
    }

    Ok(stats)
}
