//! Error types for the Refract prompt enhancement pipeline.
//!
//! `RefractError` covers setup: loading config and reading image files.
//! `EnhanceError` never reaches the caller of [`crate::MemoizedEnhancer::enhance`];
//! every enhancement fault degrades to the original prompt, and the variants
//! only classify the fallback for diagnostics and `try_enhance`.

use thiserror::Error;

/// Top-level error type for setting up Refract (loading config, reading images).
#[derive(Error, Debug)]
pub enum RefractError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Reasons an enhancement fell back to the original prompt.
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// The raw prompt was not valid percent-encoding
    #[error("Malformed prompt encoding: {message}")]
    Decode { message: String },

    /// The model has no instruction for the requested task
    #[error("Model '{model}' does not support the {task} task")]
    UnsupportedTask { model: String, task: String },

    /// The remote service answered with a non-success status
    #[error("Remote returned HTTP {status_code}: {body}")]
    Transport { status_code: u16, body: String },

    /// The remote service could not be reached or the body could not be read
    #[error("Remote request failed: {message}")]
    Network { message: String },

    /// The remote service did not answer before the deadline
    #[error("Remote request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Convenience type alias for Refract results.
pub type Result<T> = std::result::Result<T, RefractError>;

/// Convenience type alias for enhancement-specific results.
pub type EnhanceResult<T> = std::result::Result<T, EnhanceError>;
