//! # Adapters Layer
//!
//! Outbound adapters for the indexer port.

pub mod rpc;
