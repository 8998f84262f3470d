//! # Ports Layer
//!
//! The reconciler's only outbound dependency is the ledger scanner
//! (`sb_02_ledger_scanner::LedgerScannerApi`).

pub mod inbound;
