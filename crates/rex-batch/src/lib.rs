//! REX Batch - Directory processing and export
//!
//! Walks a folder of résumés, runs text extraction and field recognition on
//! each document, and reports progress as `BatchEvent`s. Per-document
//! failures are reported and skipped; they never stop the batch. The
//! collected `BatchResult` is handed to the exporter by value.

use std::path::PathBuf;
use thiserror::Error;

pub mod export;
pub mod runner;

pub use export::{export, write_csv, write_json, ExportOutcome};
pub use runner::{BatchEvent, BatchHandle, BatchResult, BatchRunner, FileFailure, ProcessedFile};

/// Errors that end a batch or an export
#[derive(Error, Debug)]
pub enum BatchError {
    /// The input directory could not be listed
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file could not be created
    #[error("cannot create export file {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The background worker panicked or was cancelled
    #[error("batch worker failed: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, BatchError>;
