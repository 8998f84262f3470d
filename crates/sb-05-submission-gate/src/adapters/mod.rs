//! # Adapters Layer

pub mod rpc;
