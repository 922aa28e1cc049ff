//! Flat-file ingestion of airports and routes

pub mod airports;
pub mod routes;

pub use airports::{load_airports, read_airports, AirportStats};
pub use routes::{load_routes, read_routes, RouteStats};

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open an input file for buffered line reading
pub(crate) fn open_input(path: &str) -> Result<BufReader<File>> {
    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    Ok(BufReader::new(file))
}

/// Trim surrounding whitespace and wrapping double quotes
pub(crate) fn strip_quotes(field: &str) -> &str {
    field.trim().trim_matches('"')
}
