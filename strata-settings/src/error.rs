//! Settings error types

use thiserror::Error;

/// Settings result type
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// No scope in the resolution chain holds a value for the key
    #[error("Trying to retrieve unregistered setting with no value given: '{key}'")]
    MissingKey { key: String },

    /// An extruder number does not address a known extruder scope
    #[error("Extruder {index} requested but only {count} extruder(s) are configured")]
    ExtruderOutOfRange { index: i64, count: usize },

    /// IO error reading a definitions or settings file
    #[error("Failed to read settings file: {0}")]
    FileReadError(#[from] std::io::Error),

    /// YAML/JSON parsing error
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Malformed command-line pair or environment override
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SettingsError {
    /// Create a missing-key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        SettingsError::MissingKey { key: key.into() }
    }

    /// Process exit status a front end should terminate with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SettingsError::MissingKey { .. } => 2,
            SettingsError::ExtruderOutOfRange { .. } => 3,
            SettingsError::FileReadError(_)
            | SettingsError::ParseError(_)
            | SettingsError::InvalidArgument(_) => 1,
        }
    }

    /// Whether this error comes from a key that no scope could resolve
    pub fn is_missing_key(&self) -> bool {
        matches!(self, SettingsError::MissingKey { .. })
    }
}
