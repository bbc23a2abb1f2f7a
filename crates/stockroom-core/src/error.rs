//! Error types for stockroom-core

use thiserror::Error;

/// Result type alias for stockroom operations
pub type Result<T> = std::result::Result<T, StockroomError>;

/// Main error type for stockroom operations
#[derive(Error, Debug)]
pub enum StockroomError {
    /// Draft validation errors
    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    /// Stock adjustment errors
    #[error("Adjustment error: {0}")]
    Adjust(#[from] AdjustError),

    /// CSV export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Draft validation errors
///
/// All of these abort the submission before any store call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// A required form field is blank
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),
}

/// Stock adjustment errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdjustError {
    /// No cached record with the given composite id
    #[error("No item with id {0}")]
    UnknownItem(String),

    /// The entered amount was zero
    #[error("Adjustment amount must be a positive number")]
    ZeroAmount,

    /// Dispatch would take the quantity below zero; rejected, never clamped
    #[error("Cannot dispatch {requested}: only {available} in stock")]
    InsufficientStock { requested: u32, available: u32 },
}

/// CSV export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// There are no rows to export
    #[error("Nothing to export")]
    Empty,

    /// The csv writer failed
    #[error("CSV write failed: {0}")]
    Write(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Write(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Write(err.to_string())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file at the resolved path
    #[error("Config file not found at {0}; create it with a [store] url and [[users]] entries")]
    NotFound(String),

    /// The file exists but could not be read
    #[error("Could not read config: {0}")]
    Io(String),

    /// The file is not valid TOML for the expected shape
    #[error("Could not parse config: {0}")]
    Parse(String),

    /// The parsed values fail validation
    #[error("Invalid config: {0}")]
    Invalid(String),
}
