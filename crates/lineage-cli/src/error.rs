//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A person the command was asked about does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Dataset error
    #[error("Dataset error: {0}")]
    Store(#[from] lineage_store::StoreError),

    /// Graph lookup error
    #[error("Graph error: {0}")]
    Graph(#[from] lineage_graph::GraphError),

    /// Calendar conversion error
    #[error("Calendar error: {0}")]
    Calendar(#[from] lineage_calendar::CalendarError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
