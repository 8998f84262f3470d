//! # Ledger Scanner (SB-02)
//!
//! Turns a [`CellSelector`] into a lazy stream of live cells by paging through
//! the indexer's `get_cells` RPC.
//!
//! ## Stream Contract
//!
//! - **Finite**: bounded by the ledger state while the scan runs.
//! - **Not restartable**: each call to `scan` is a fresh snapshot; a stream
//!   cannot be rewound.
//! - **Drain to complete**: dropping the stream early truncates the result
//!   silently. Use [`drain`] when the caller needs every cell.
//! - **Abort on failure**: a transport or RPC error yields one
//!   `ScanError::ScanUnavailable` and ends the stream. Scans have no side
//!   effects, so the caller may retry the whole scan.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): selectors, search keys, errors
//! - **Ports Layer** (`ports/`): `LedgerScannerApi` (inbound), `IndexerClient` (outbound)
//! - **Adapters Layer** (`adapters/`): JSON-RPC indexer client
//! - **Service Layer** (`service.rs`): pagination loop

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::rpc::IndexerRpcClient;
pub use domain::entities::{CellSelector, CellsPage, ScriptType, SearchKey, SearchMode};
pub use domain::errors::{IndexerError, ScanError};
pub use ports::inbound::{CellStream, LedgerScannerApi};
pub use ports::outbound::IndexerClient;
pub use service::{drain, LedgerScanner};
