//! REX Configuration Management
//!
//! Handles configuration from a TOML file and environment variables, with
//! defaults that reproduce the stock behavior when neither is present.
//! Only the command-line driver loads configuration; text extraction and
//! field recognition never read it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Field;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Input directory scanning
    pub input: InputConfig,

    /// Export destination and format
    pub export: ExportConfig,

    /// Custom recognizer patterns
    pub recognizer: RecognizerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|message| ConfigError::ParseError { path, message })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply every variable that is set, whatever its value
    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(level) = var("REX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("REX_EXPORT_FORMAT") {
            self.export.format = format.parse()?;
        }
        if let Some(path) = var("REX_OUTPUT") {
            self.export.path = Some(PathBuf::from(path));
        }

        Ok(self)
    }
}

/// Input directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Case-sensitive file name suffix selecting documents
    pub suffix: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            suffix: ".pdf".to_string(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Output file format
    pub format: ExportFormat,

    /// Output file path (the CLI flag takes precedence)
    pub path: Option<PathBuf>,
}

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "REX_EXPORT_FORMAT".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Regex overrides for individual fields.
///
/// A pattern with a capture group yields its first group, otherwise the
/// whole match. Unset fields keep the built-in matcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecognizerConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl RecognizerConfig {
    /// Configured overrides as (field, pattern) pairs
    pub fn overrides(&self) -> Vec<(Field, &str)> {
        [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::PhoneNumber, &self.phone),
            (Field::Address, &self.address),
        ]
        .into_iter()
        .filter_map(|(field, pattern)| pattern.as_deref().map(|p| (field, p)))
        .collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
