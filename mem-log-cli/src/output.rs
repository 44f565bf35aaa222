//! Report output writers
//!
//! CSV and JSON Lines emission of the lifetime table. The CSV file, with its
//! `Buffer,Address,Lifetime` header, is the contract consumed by the
//! histogram renderer.

use anyhow::{Context, Result};
use mem_log_decoder::ReportRow;
use std::path::Path;

/// Write rows as the CSV lifetime table
///
/// The header is written even for an empty report, so downstream consumers
/// always see a well-formed table.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create lifetime table {:?}", path))?;

    writer.write_record(["Buffer", "Address", "Lifetime"])?;
    for row in rows {
        writer.write_record(&[
            row.location.clone(),
            row.address.to_string(),
            row.lifetime.to_string(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write lifetime table {:?}", path))?;

    log::info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Read a lifetime table back into rows
pub fn read_csv(path: &Path) -> Result<Vec<ReportRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open lifetime table {:?}", path))?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: ReportRow =
            result.with_context(|| format!("Malformed row in lifetime table {:?}", path))?;
        rows.push(row);
    }

    log::info!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Write rows as JSON Lines, one row object per line
pub fn write_jsonl(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut lines = Vec::new();
    for row in rows {
        lines.push(serde_json::to_string(row)?);
    }
    std::fs::write(path, lines.join("\n") + "\n")
        .with_context(|| format!("Failed to write JSON rows {:?}", path))?;
    Ok(())
}
