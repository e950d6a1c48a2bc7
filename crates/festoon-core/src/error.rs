//! Error types for festoon

use thiserror::Error;

/// The main error type for festoon operations
#[derive(Debug, Error)]
pub enum FestoonError {
    #[error("Invalid slot count: {requested} (must be a positive integer)")]
    InvalidSlotCount { requested: i64 },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for festoon operations
pub type Result<T> = std::result::Result<T, FestoonError>;

impl From<toml::de::Error> for FestoonError {
    fn from(err: toml::de::Error) -> Self {
        FestoonError::TomlParseError(err.to_string())
    }
}
