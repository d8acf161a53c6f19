//! Output formatting and persistence for the finished feature set.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use tracing::{debug, info};

use crate::pipeline::schema::{FeatureRow, FeatureTable};
use csv::WriterBuilder;
use std::fs::File;

/// Logs a feature row using Rust's debug pretty-print format.
pub fn print_pretty(row: &FeatureRow) {
    debug!("{:#?}", row);
}

/// Logs a feature row as pretty-printed JSON.
pub fn print_json(row: &FeatureRow) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(row)?);
    Ok(())
}

/// Writes the feature table to a CSV file with a header row.
///
/// Any existing file at `path` is replaced; the table is always written
/// whole, never appended to.
pub fn write_table(path: &str, table: &FeatureTable) -> Result<()> {
    let file = File::create(path)?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path, rows = table.rows.len(), "Feature table written");
    Ok(())
}
