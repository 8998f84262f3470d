//! # Integration Tests
//!
//! The runtime is wired through `BlogRuntime::with_clients` onto a
//! [`mock_chain::MockChain`] that plays both the indexer and the node. Cells
//! created by a submitted transaction become visible to the next scan, so a
//! publish can be followed by a read.

#[cfg(test)]
pub mod mock_chain;

#[cfg(test)]
mod flows;
