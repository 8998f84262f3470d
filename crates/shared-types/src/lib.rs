//! # Shared Types Crate
//!
//! Ledger primitives used by every Spore-Blog subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Scripts, cells and transactions are defined
//!   once here and shared by the scanner, reconciler, signer and gate.
//! - **Byte-Exact Packing**: Every entity that is hashed or stored on chain
//!   packs itself with the molecule layout in [`molecule`].
//! - **Explicit Configuration**: Script identities and endpoints travel in a
//!   [`ChainConfig`] value; there is no process-wide network state.

pub mod config;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod hex_serde;
pub mod molecule;
pub mod rpc;

pub use config::{ChainConfig, ScriptInfo};
pub use entities::*;
pub use errors::*;
pub use hashing::{ckb_hash, CkbHasher};
pub use rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
