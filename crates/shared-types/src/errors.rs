//! # Error Types
//!
//! Errors shared across subsystems.

use thiserror::Error;

/// Errors raised while unpacking molecule-encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackingError {
    /// Buffer is shorter than the structure it claims to hold.
    #[error("Truncated data: need {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Declared total size disagrees with the buffer length.
    #[error("Size mismatch: header says {declared}, buffer has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    /// Offset table is malformed (unaligned, decreasing or out of range).
    #[error("Invalid offset table: {0}")]
    InvalidOffsets(String),

    /// Table carries fewer fields than the schema requires.
    #[error("Field count mismatch: expected {expected}, found {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// An enum byte (hash type, dep type) is not recognised.
    #[error("Unknown {kind} byte: {value}")]
    UnknownVariant { kind: &'static str, value: u8 },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An endpoint is empty or not an http(s) URL.
    #[error("Invalid {name} endpoint: {url:?}")]
    InvalidEndpoint { name: &'static str, url: String },

    /// Indexer page size must be in [1, 10000].
    #[error("Invalid page size: {0}")]
    InvalidPageSize(u32),

    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(String),

    /// Config file is not valid JSON for `ChainConfig`.
    #[error("Failed to parse config file: {0}")]
    Parse(String),
}
