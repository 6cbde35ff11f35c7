//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown output format.
    #[error("Invalid format: {0}. Use table, json, csv, or minimal.")]
    InvalidFormat(String),

    /// Unknown configuration key.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value rejected for a configuration key.
    #[error("Invalid value for {key}: {value}. {hint}")]
    InvalidValue {
        /// Configuration key
        key: &'static str,
        /// Rejected value
        value: String,
        /// Accepted values
        hint: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
