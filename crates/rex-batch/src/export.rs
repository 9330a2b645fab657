//! Record export
//!
//! CSV output has the fixed header `Name,Email,Phone Number,Address`, one
//! row per record and no index column. Absent fields are empty cells.
//! JSON output is an array of objects with the same keys and `null` for
//! absent fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rex_core::{ContactRecord, ExportFormat, Field};

use crate::{BatchError, Result};

/// Outcome of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Records were written to `path`
    Saved { path: PathBuf, records: usize },
    /// There were no records, nothing was written
    NothingToExport,
}

impl std::fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved { path, .. } => write!(f, "Information saved to {}.", path.display()),
            Self::NothingToExport => {
                write!(f, "No data to export. Please process the PDFs first.")
            }
        }
    }
}

/// Write records as CSV
pub fn write_csv<W: Write>(writer: W, records: &[ContactRecord]) -> Result<()> {
    // Headers are written by hand so an empty export still has them
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(Field::ALL.map(|field| field.as_str()))?;
    for record in records {
        wtr.write_record(record.fields().map(|(_, value)| value.unwrap_or_default()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write records as a JSON array
pub fn write_json<W: Write>(mut writer: W, records: &[ContactRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Export records to `path` in the given format.
///
/// Nothing is written when `records` is empty.
pub fn export(
    records: &[ContactRecord],
    path: &Path,
    format: ExportFormat,
) -> Result<ExportOutcome> {
    if records.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let file = File::create(path).map_err(|e| BatchError::Export {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(writer, records)?,
        ExportFormat::Json => write_json(writer, records)?,
    }

    tracing::info!(path = %path.display(), records = records.len(), %format, "Exported records");

    Ok(ExportOutcome::Saved {
        path: path.to_path_buf(),
        records: records.len(),
    })
}
