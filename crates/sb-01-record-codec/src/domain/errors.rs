//! # Codec Errors

use shared_types::PackingError;
use thiserror::Error;

/// Errors raised while decoding cell data.
///
/// Inside listings these are non-fatal: the offending cell is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Byte layout does not match the record schema.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl From<PackingError> for CodecError {
    fn from(err: PackingError) -> Self {
        CodecError::MalformedRecord(err.to_string())
    }
}
