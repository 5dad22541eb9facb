//! Error types for the ironlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ironlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exercise catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Plan request rejected before generation
    #[error("Invalid plan request: {0}")]
    InvalidRequest(String),

    /// A textual value could not be parsed into a domain type
    #[error("Parse error: {0}")]
    Parse(String),

    /// Logged exercise rejected before it reaches the log
    #[error("Invalid workout log: {0}")]
    InvalidLog(String),

    /// No workout plan has been stored yet
    #[error("No workout plan found. Please generate one.")]
    NoPlan,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
