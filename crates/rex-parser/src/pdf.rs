//! PDF document parser using pdf-extract
//!
//! Extracts the visible text of every page, in page order, as one string.
//! Pages are joined with no separator beyond what each page's text ends with.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::{DocumentParser, ParsedDocument, ParserError, Result};

/// PDF document parser
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a PDF file.
    ///
    /// The file is read in full and closed before parsing starts, so no
    /// handle outlives this call on any path.
    fn extract_text(&self, path: &Path) -> Result<(String, Option<u32>)> {
        let bytes = std::fs::read(path).map_err(|e| ParserError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        // pdf-extract panics on some malformed inputs instead of erroring
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        }))
        .map_err(|payload| ParserError::InvalidPdf {
            path: path.to_path_buf(),
            reason: panic_reason(payload.as_ref()),
        })?;

        let pages = extracted.map_err(|e| ParserError::InvalidPdf {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let page_count = u32::try_from(pages.len()).ok();
        let text = pages.concat();

        // Image-only pages still produce layout whitespace
        if text.trim().is_empty() {
            return Ok((String::new(), page_count));
        }

        Ok((text, page_count))
    }
}

impl DocumentParser for PdfParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let (text, page_count) = self.extract_text(path)?;

        let mut doc = ParsedDocument::new(path).with_content(text);
        doc.page_count = page_count;

        Ok(doc)
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());

    format!("PDF backend panicked: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_panic_reason() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("index out of bounds");
        assert_eq!(
            panic_reason(payload.as_ref()),
            "PDF backend panicked: index out of bounds"
        );

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_reason(payload.as_ref()), "PDF backend panicked: unknown cause");
    }

    #[test]
    fn test_not_a_pdf() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is a plain text file pretending to be a PDF")
            .unwrap();

        let err = PdfParser::new().parse(file.path()).unwrap_err();
        assert!(matches!(err, ParserError::InvalidPdf { .. }));
        assert_eq!(err.path(), file.path());
    }
}
