//! Regex-based field recognizer
//!
//! Built-in matchers:
//! - Name: a line starting with `Name:`, capturing the rest of the line.
//!   Whitespace after the label may span line breaks, so a value set on
//!   the next line is still captured
//! - Email: `[\w.-]+@[\w.-]+`, no domain-suffix validation
//! - Phone: `\+?\d[\d -]{8,12}\d`. This is loose and also hits postal
//!   codes and ID numbers; kept as-is so existing exports stay comparable.
//! - Address: a line starting with `Address:`, same capture rule as Name
//!
//! Matches are not scoped by label, so a phone-shaped run inside an
//! `Address:` line is reported as both.

use once_cell::sync::Lazy;
use regex::Regex;
use rex_core::{ContactRecord, Field};

use crate::{ExtractorError, Result};

pub const NAME_PATTERN: &str = r"(?m)^Name:\s*([^\r\n]*)";
pub const EMAIL_PATTERN: &str = r"[\w.-]+@[\w.-]+";
pub const PHONE_PATTERN: &str = r"\+?\d[\d -]{8,12}\d";
pub const ADDRESS_PATTERN: &str = r"(?m)^Address:\s*([^\r\n]*)";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NAME_PATTERN).unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_PATTERN).unwrap());
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(ADDRESS_PATTERN).unwrap());

/// One field's matcher
#[derive(Debug, Clone)]
struct FieldMatcher {
    field: Field,
    regex: Regex,
}

impl FieldMatcher {
    /// First match in document order.
    ///
    /// Yields capture group 1 when the pattern has one and it took part in
    /// the match, otherwise the whole match.
    fn find(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
    }
}

/// Recognizes contact fields in raw document text
#[derive(Debug, Clone)]
pub struct FieldRecognizer {
    /// One matcher per field, in `Field::ALL` order
    matchers: Vec<FieldMatcher>,
}

impl FieldRecognizer {
    /// Create a recognizer with the built-in patterns
    pub fn new() -> Self {
        let matchers = Field::ALL
            .into_iter()
            .map(|field| FieldMatcher {
                field,
                regex: builtin_regex(field).clone(),
            })
            .collect();

        Self { matchers }
    }

    /// Replace the matcher for one field
    pub fn with_pattern(mut self, field: Field, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ExtractorError::InvalidPattern {
            field,
            message: e.to_string(),
        })?;

        if let Some(matcher) = self.matchers.iter_mut().find(|m| m.field == field) {
            matcher.regex = regex;
        }

        Ok(self)
    }

    /// Apply several overrides in order, stopping at the first invalid one
    pub fn with_patterns<'a>(
        self,
        overrides: impl IntoIterator<Item = (Field, &'a str)>,
    ) -> Result<Self> {
        overrides
            .into_iter()
            .try_fold(self, |recognizer, (field, pattern)| {
                recognizer.with_pattern(field, pattern)
            })
    }

    /// Pattern text currently used for a field
    pub fn pattern(&self, field: Field) -> &str {
        self.matchers
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.regex.as_str())
            .unwrap_or_default()
    }

    /// Build a record from the first match of every field
    pub fn recognize(&self, text: &str) -> ContactRecord {
        self.matchers
            .iter()
            .fold(ContactRecord::empty(), |record, matcher| {
                record.with(matcher.field, matcher.find(text))
            })
    }
}

impl Default for FieldRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_regex(field: Field) -> &'static Regex {
    match field {
        Field::Name => &NAME_RE,
        Field::Email => &EMAIL_RE,
        Field::PhoneNumber => &PHONE_RE,
        Field::Address => &ADDRESS_RE,
    }
}
