//! Capability-client error types

use thiserror::Error;

/// Failures raised by capability clients
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Attribute missing on {0}")]
    MissingAttribute(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Communication error: {0}")]
    Communication(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
