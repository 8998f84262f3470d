//! # Ports Layer
//!
//! - `inbound`: what the scanner offers (`LedgerScannerApi`)
//! - `outbound`: what the scanner needs (`IndexerClient`)

pub mod inbound;
pub mod outbound;
