//! Output formatting and persistence for aggregate views.
//!
//! Supports pretty-printing, JSON file output for the full report, and CSV
//! append for row-shaped views.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(view: &T) {
    debug!("{:#?}", view);
}

/// Logs a view as pretty-printed JSON.
pub fn print_json<T: Serialize>(view: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes a view as pretty-printed JSON to a file, replacing any previous
/// contents. This is how the full dashboard report reaches the renderer.
pub fn write_json_file<T: Serialize>(path: &str, view: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(view)?;
    std::fs::write(path, json)?;
    info!(path, "JSON view written");
    Ok(())
}

/// Appends row-shaped view records to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records<T: Serialize>(path: &str, records: &[T]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
