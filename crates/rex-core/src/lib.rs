//! REX Core - Record types and configuration shared across the workspace
//!
//! This crate defines:
//! - `ContactRecord`, the four-field result of recognizing one résumé
//! - `Field`, the fixed set of keys a record carries
//! - Configuration management for the command-line driver

pub mod config;

pub use config::{
    AppConfig, ConfigError, ExportConfig, ExportFormat, InputConfig, LoggingConfig,
    RecognizerConfig,
};

use serde::{Deserialize, Serialize};

// ============================================================================
// Fields
// ============================================================================

/// The fixed keys of a contact record, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    PhoneNumber,
    Address,
}

impl Field {
    /// All fields in export column order
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::PhoneNumber, Field::Address];

    /// Column label used in exported files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
            Self::Address => "Address",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" | "phone_number" => Ok(Self::PhoneNumber),
            "address" => Ok(Self::Address),
            _ => Err(ConfigError::InvalidValue {
                key: "field".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Contact Record
// ============================================================================

/// Contact details recognized in a single document.
///
/// Every record carries all four fields. `None` means no match was found,
/// which is distinct from a match that captured an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "Name")]
    name: Option<String>,

    #[serde(rename = "Email")]
    email: Option<String>,

    #[serde(rename = "Phone Number")]
    phone_number: Option<String>,

    #[serde(rename = "Address")]
    address: Option<String>,
}

impl ContactRecord {
    /// Create a record with every field absent
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set one field, consuming the record
    pub fn with(mut self, field: Field, value: Option<String>) -> Self {
        *self.slot_mut(field) = value;
        self
    }

    /// Value of a field, `None` when absent
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::PhoneNumber => self.phone_number.as_deref(),
            Field::Address => self.address.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.get(Field::Name)
    }

    pub fn email(&self) -> Option<&str> {
        self.get(Field::Email)
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.get(Field::PhoneNumber)
    }

    pub fn address(&self) -> Option<&str> {
        self.get(Field::Address)
    }

    /// All four fields with their values, in column order
    pub fn fields(&self) -> [(Field, Option<&str>); 4] {
        Field::ALL.map(|field| (field, self.get(field)))
    }

    /// Number of fields that matched
    pub fn matched_count(&self) -> usize {
        self.fields().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// True when no field matched
    pub fn is_empty(&self) -> bool {
        self.matched_count() == 0
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Address => &mut self.address,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_all_fields() {
        let record = ContactRecord::empty();
        let fields = record.fields();

        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|(_, v)| v.is_none()));
        assert!(record.is_empty());
    }

    #[test]
    fn test_record_builder() {
        let record = ContactRecord::empty()
            .with(Field::Name, Some("Jane Doe".to_string()))
            .with(Field::Address, Some(String::new()));

        assert_eq!(record.name(), Some("Jane Doe"));
        assert_eq!(record.email(), None);
        // An empty capture is still a match
        assert_eq!(record.address(), Some(""));
        assert_eq!(record.matched_count(), 2);
    }

    #[test]
    fn test_field_labels() {
        let labels: Vec<_> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(labels, vec!["Name", "Email", "Phone Number", "Address"]);
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("name".parse::<Field>().unwrap(), Field::Name);
        assert_eq!("Phone Number".parse::<Field>().unwrap(), Field::PhoneNumber);
        assert_eq!("phone".parse::<Field>().unwrap(), Field::PhoneNumber);
        assert!("fax".parse::<Field>().is_err());
    }

    #[test]
    fn test_record_serializes_with_column_labels() {
        let record = ContactRecord::empty().with(Field::Email, Some("a@x.com".to_string()));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["Email"], "a@x.com");
        assert!(json["Name"].is_null());
        assert!(json["Phone Number"].is_null());
        assert!(json["Address"].is_null());
    }
}
