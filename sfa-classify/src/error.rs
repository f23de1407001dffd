//! Error types for sfa-classify
//!
//! Transport errors never escape the classification client: they are
//! logged and turned into an unusable response so the retry loop can treat
//! them like any other transient status. Everything else here is fatal to
//! the run and belongs to the driver or the binary.

use thiserror::Error;

/// sfa-classify error type
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with a non-success HTTP status
    #[error("HTTP error {0}")]
    HttpStatus(u16),

    /// Response body is not a usable classify document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// sfa-common error
    #[error("Common error: {0}")]
    Common(#[from] sfa_common::Error),
}

/// Result type for sfa-classify operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;
