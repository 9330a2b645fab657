//! REX Extractor - Contact field recognition
//!
//! Applies one regex matcher per field to the raw text of a document and
//! collects the first match of each into a `ContactRecord`. Matchers are
//! independent: none of them consumes or rewrites the text another sees.

use once_cell::sync::Lazy;
use rex_core::{ContactRecord, Field};
use thiserror::Error;

pub mod recognizer;

pub use recognizer::{FieldRecognizer, ADDRESS_PATTERN, EMAIL_PATTERN, NAME_PATTERN, PHONE_PATTERN};

/// Errors raised while building a recognizer.
///
/// Recognition itself never fails; only custom patterns can be rejected.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Invalid pattern for {field}: {message}")]
    InvalidPattern { field: Field, message: String },
}

pub type Result<T> = std::result::Result<T, ExtractorError>;

static DEFAULT_RECOGNIZER: Lazy<FieldRecognizer> = Lazy::new(FieldRecognizer::new);

/// Recognize contact fields with the built-in patterns
pub fn recognize(text: &str) -> ContactRecord {
    DEFAULT_RECOGNIZER.recognize(text)
}
