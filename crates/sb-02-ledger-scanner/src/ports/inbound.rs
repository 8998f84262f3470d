//! # Inbound Port

use std::pin::Pin;

use futures::Stream;
use shared_types::Cell;

use crate::domain::entities::CellSelector;
use crate::domain::errors::ScanError;

/// Lazy, finite, non-restartable sequence of live cells.
pub type CellStream = Pin<Box<dyn Stream<Item = Result<Cell, ScanError>> + Send>>;

/// Scanner API consumed by the reconciler.
pub trait LedgerScannerApi: Send + Sync {
    /// Start a fresh scan. Nothing is fetched until the stream is polled.
    fn scan(&self, selector: CellSelector) -> CellStream;
}
