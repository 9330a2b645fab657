//! Batch runner
//!
//! Processes the documents of one directory, one at a time in listing
//! order, so progress messages read as a deterministic narrative.

use std::path::{Path, PathBuf};

use rex_core::ContactRecord;
use rex_extractor::FieldRecognizer;
use rex_parser::{DocumentParser, ParserError, PdfParser};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{BatchError, Result};

// ============================================================================
// Events and results
// ============================================================================

/// Progress reported while a batch runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// The directory holds no matching documents
    NoPdfFiles,
    /// A document is about to be processed
    Processing { file_name: String },
    /// A document failed and was skipped
    Failed { file_name: String, message: String },
    /// Every document was visited and at least one succeeded
    Completed { processed: usize, failed: usize },
}

impl std::fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPdfFiles => write!(f, "No PDF files found in the selected folder."),
            Self::Processing { file_name } => write!(f, "Processing {file_name}..."),
            Self::Failed { file_name, message } => {
                write!(f, "Error processing {file_name}: {message}")
            }
            Self::Completed { .. } => write!(f, "All PDFs processed. Ready to export CSV."),
        }
    }
}

/// A document that produced a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub file_name: String,
    pub record: ContactRecord,
}

/// A document that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// Outcome of a batch: records in listing order plus skipped documents
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub files: Vec<ProcessedFile>,
    pub failures: Vec<FileFailure>,
}

impl BatchResult {
    /// Records in listing order
    pub fn records(&self) -> Vec<ContactRecord> {
        self.files.iter().map(|f| f.record.clone()).collect()
    }

    /// Consume the result, keeping only the records
    pub fn into_records(self) -> Vec<ContactRecord> {
        self.files.into_iter().map(|f| f.record).collect()
    }

    /// True when no document produced a record
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Runs extraction and recognition over a directory
pub struct BatchRunner<P = PdfParser> {
    parser: P,
    recognizer: FieldRecognizer,
    suffix: String,
}

impl BatchRunner<PdfParser> {
    /// Create a runner reading PDFs with the built-in patterns
    pub fn new() -> Self {
        Self::with_parser(PdfParser::new())
    }
}

impl Default for BatchRunner<PdfParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DocumentParser> BatchRunner<P> {
    /// Create a runner with a custom text source
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            recognizer: FieldRecognizer::new(),
            suffix: ".pdf".to_string(),
        }
    }

    /// Use a custom recognizer
    pub fn with_recognizer(mut self, recognizer: FieldRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Select documents by a different case-sensitive file name suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Regular files in `dir` whose name ends with the suffix, in listing order
    pub fn list_documents(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let read_dir_error = |source| BatchError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut documents = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            let matches_suffix = path
                .file_name()
                .map(|name| name.to_string_lossy().ends_with(&self.suffix))
                .unwrap_or(false);

            if matches_suffix && path.is_file() {
                documents.push(path);
            }
        }

        Ok(documents)
    }

    /// Extract and recognize a single document
    pub fn process_file(&self, path: &Path) -> std::result::Result<ContactRecord, ParserError> {
        let doc = self.parser.parse(path)?;
        tracing::debug!(
            file = %path.display(),
            chars = doc.char_count(),
            pages = ?doc.page_count,
            "Extracted text"
        );

        Ok(self.recognizer.recognize(&doc.content))
    }

    /// Process every document in `dir`, reporting each event to `on_event`.
    ///
    /// Only a directory that cannot be listed fails the batch.
    pub fn run(&self, dir: &Path, mut on_event: impl FnMut(BatchEvent)) -> Result<BatchResult> {
        let documents = self.list_documents(dir)?;
        tracing::info!(dir = %dir.display(), documents = documents.len(), "Batch started");

        let mut result = BatchResult::default();
        if documents.is_empty() {
            on_event(BatchEvent::NoPdfFiles);
            return Ok(result);
        }

        for path in documents {
            let file_name = display_name(&path);
            on_event(BatchEvent::Processing {
                file_name: file_name.clone(),
            });

            match self.process_file(&path) {
                Ok(record) => {
                    tracing::debug!(
                        file = %file_name,
                        matched = record.matched_count(),
                        "Recognized fields"
                    );
                    result.files.push(ProcessedFile { file_name, record });
                }
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Skipping document");
                    let message = e.to_string();
                    on_event(BatchEvent::Failed {
                        file_name: file_name.clone(),
                        message: message.clone(),
                    });
                    result.failures.push(FileFailure { file_name, message });
                }
            }
        }

        tracing::info!(
            processed = result.files.len(),
            failed = result.failures.len(),
            "Batch finished"
        );

        if !result.files.is_empty() {
            on_event(BatchEvent::Completed {
                processed: result.files.len(),
                failed: result.failures.len(),
            });
        }

        Ok(result)
    }
}

impl<P: DocumentParser + 'static> BatchRunner<P> {
    /// Run the batch on a blocking worker, streaming events over a channel
    pub fn spawn(self, dir: impl Into<PathBuf>) -> BatchHandle {
        let dir = dir.into();
        let (tx, events) = mpsc::unbounded_channel();

        let task = tokio::task::spawn_blocking(move || {
            self.run(&dir, |event| {
                // A dropped receiver only silences progress
                let _ = tx.send(event);
            })
        });

        BatchHandle { events, task }
    }
}

/// A batch running in the background
pub struct BatchHandle {
    /// Progress events; closes when the batch ends
    pub events: mpsc::UnboundedReceiver<BatchEvent>,
    task: JoinHandle<Result<BatchResult>>,
}

impl BatchHandle {
    /// Next progress event, `None` once the batch has ended
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Wait for the batch to end and take its result
    pub async fn finish(self) -> Result<BatchResult> {
        self.task
            .await
            .map_err(|e| BatchError::Join(e.to_string()))?
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Tests
// ============================================================================
