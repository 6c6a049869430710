//! Error types for the clipsift pipeline.
//!
//! Errors are split between fatal setup failures (bad config, missing model)
//! and per-item failures (one image that cannot be decoded or embedded). The
//! batch loop swallows per-item failures into a [`crate::ScoreOutcome`]; setup
//! failures propagate to the top level.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for clipsift operations.
#[derive(Error, Debug)]
pub enum ClipsiftError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

/// Pipeline processing errors.
///
/// `Model` is always fatal (the run cannot score anything without the
/// encoders); the path-carrying variants are per-item and recoverable.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Embedding generation failed
    #[error("Embedding failed for {path}: {message}")]
    Embedding { path: PathBuf, message: String },

    /// Model loading or text encoding failed
    #[error("Model error: {message}")]
    Model { message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Convenience type alias for clipsift results.
pub type Result<T> = std::result::Result<T, ClipsiftError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
