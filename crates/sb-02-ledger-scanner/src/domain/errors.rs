//! # Scan Errors

use shared_types::JsonRpcError;
use thiserror::Error;

/// Errors surfaced by a scan stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The indexer could not be reached or answered with an error.
    /// The scan is aborted; retrying the whole scan is safe.
    #[error("Scan unavailable: {0}")]
    ScanUnavailable(String),

    /// The selector names neither a type script nor an owner lock.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Errors from the indexer port.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// HTTP failure (connect, timeout, status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The indexer returned a JSON-RPC error object.
    #[error("RPC error: {0}")]
    Rpc(JsonRpcError),

    /// The response did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<IndexerError> for ScanError {
    fn from(err: IndexerError) -> Self {
        ScanError::ScanUnavailable(err.to_string())
    }
}
