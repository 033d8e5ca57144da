//! Error types for Hookshot

use thiserror::Error;

/// The main error type for Hookshot operations
#[derive(Debug, Error)]
pub enum HookshotError {
    #[error("Mode not registered: {0}")]
    UnregisteredMode(String),

    #[error("State machine has no registered modes")]
    NoModes,

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Script error: {0}")]
    ScriptError(String),
}

/// Result type alias for Hookshot operations
pub type Result<T> = std::result::Result<T, HookshotError>;

impl From<toml::de::Error> for HookshotError {
    fn from(err: toml::de::Error) -> Self {
        HookshotError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for HookshotError {
    fn from(err: toml::ser::Error) -> Self {
        HookshotError::TomlSerError(err.to_string())
    }
}
