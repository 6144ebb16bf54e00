//! Common error types for spoofmeta

use crate::schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Common result type for spoofmeta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the spoofmeta tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cannot open or read a specific source file
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV read or write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed source data (protocol line, unmapped label, ...)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Metadata row failed the unified schema contract
    #[error("Schema validation error: {0}")]
    Schema(#[from] SchemaError),

    /// Audio file could not be probed for sample rate / duration
    #[error("Audio probe error: {0}")]
    Probe(String),

    /// Sampled existence check found absent audio files
    #[error("missing audio files in existence sample: {0:?}")]
    MissingAudio(Vec<String>),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}
