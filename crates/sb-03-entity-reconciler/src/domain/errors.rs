//! # Reconciler Errors

use sb_02_ledger_scanner::ScanError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The underlying scan failed; the listing is aborted.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Not a 20-byte `0x` Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
