//! Error types for the photodir crawler and thumbnail pipeline.
//!
//! Errors are organized by stage so that every log line names the offending
//! path and what was being attempted. None of the pipeline errors abort a
//! build: they are reported and the affected entry is skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for photodir operations.
#[derive(Error, Debug)]
pub enum PhotodirError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

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

/// Per-entry failures raised while crawling or generating thumbnails.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A directory listing could not be obtained
    #[error("Cannot read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened for reading
    #[error("Cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image header was recognized but could not be read
    #[error("Probe failed for {path}: {message}")]
    Probe { path: PathBuf, message: String },

    /// Full pixel decode failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Resampling to the target size failed
    #[error("Resize error for {path}: {message}")]
    Resize { path: PathBuf, message: String },

    /// A spawned thumbnail task panicked or was cancelled
    #[error("Thumbnail task failed for {path}: {message}")]
    Task { path: PathBuf, message: String },
}

impl PipelineError {
    /// The path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DirectoryRead { path, .. }
            | Self::FileOpen { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::Probe { path, .. }
            | Self::Decode { path, .. }
            | Self::Resize { path, .. }
            | Self::Task { path, .. } => path,
        }
    }
}

/// Convenience type alias for photodir results.
pub type Result<T> = std::result::Result<T, PhotodirError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
