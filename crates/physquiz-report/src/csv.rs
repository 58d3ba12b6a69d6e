//! CSV export of locally saved results.
//!
//! Column layout matches what the grading spreadsheet expects, so the
//! headers stay in Spanish. Rows come out most recent first.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};

use physquiz_delivery::store::StoredResult;
use physquiz_delivery::BackupStore;

const HEADERS: [&str; 8] = [
    "Fecha",
    "Nombre",
    "Email",
    "Grado",
    "Correctas",
    "Total",
    "Porcentaje",
    "Nota",
];

/// Quote a cell, doubling any embedded quotes.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Render an RFC 3339 timestamp as local date-time; raw on parse failure.
fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Build the CSV content for a set of stored results.
///
/// Returns an empty string when there is nothing to export, every cell is
/// quoted, and order follows the input (the store lists most recent first).
pub fn export_csv(results: &[StoredResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(HEADERS.join(","));

    for stored in results {
        let p = &stored.payload;
        let row = [
            format_timestamp(&p.timestamp),
            p.nombre.clone(),
            p.email.clone(),
            p.grado.clone(),
            p.correctas.to_string(),
            p.total.to_string(),
            format!("{}%", p.porcentaje),
            p.nota.to_string(),
        ];
        lines.push(row.map(|cell| quote(&cell)).join(","));
    }

    lines.join("\n")
}

/// Export everything in the backup store to a CSV file.
///
/// Returns the number of result rows written (zero leaves no file behind).
pub fn write_csv_report(store: &BackupStore, path: &Path) -> Result<usize> {
    let results = store.list()?;
    if results.is_empty() {
        return Ok(0);
    }

    let csv = export_csv(&results);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, csv)?;
    Ok(results.len())
}
