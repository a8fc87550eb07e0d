//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for commuter-info operations
pub type Result<T> = std::result::Result<T, CommuterError>;

/// Main error type for the commuter-info service
#[derive(Error, Debug)]
pub enum CommuterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Report not found: {0}")]
    ReportNotFound(u64),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
