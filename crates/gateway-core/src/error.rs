//! Error types for gateway-core

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API function not available: {0}")]
    FunctionNotFound(String),

    #[error("API client construction failed: {0}")]
    ClientError(String),

    #[error("Upstream request failed: {0}")]
    UpstreamError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
