//! REX Parser - Text extraction from résumé documents
//!
//! Opens a PDF file, reads the visible text of every page in document
//! order and returns it as one string. Each parser implements the
//! `DocumentParser` trait so batch drivers can swap the text source.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod pdf;

pub use pdf::PdfParser;

// ============================================================================
// Error Types
// ============================================================================

/// A document could not be opened or parsed.
///
/// Every variant carries the path of the file that failed.
#[derive(Error, Debug)]
pub enum ParserError {
    /// The file could not be read from disk
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a PDF we can parse
    /// (corrupt data, wrong format, unsupported encryption)
    #[error("cannot parse {} as PDF: {reason}", path.display())]
    InvalidPdf { path: PathBuf, reason: String },
}

impl ParserError {
    /// Path of the document that failed
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::InvalidPdf { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// Parsed Document
// ============================================================================

/// Text extracted from one document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Path of the source file
    pub file_path: PathBuf,

    /// Concatenated page text, empty when nothing is extractable
    pub content: String,

    /// Number of pages, as reported by the PDF backend
    pub page_count: Option<u32>,
}

impl ParsedDocument {
    /// Create a new parsed document
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            content: String::new(),
            page_count: None,
        }
    }

    /// Set content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Get total word count (approximate)
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Trait for document text sources
pub trait DocumentParser: Send + Sync {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<ParsedDocument>;
}

/// Extract the concatenated text of every page of a PDF file
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    PdfParser::new().parse(path.as_ref()).map(|doc| doc.content)
}

// ============================================================================
// Tests
// ============================================================================
