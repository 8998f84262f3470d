//! # Ports Layer
//!
//! - `inbound`: `TransactionSignerApi`
//! - `outbound`: `MessageSigner`, the external wallet

pub mod inbound;
pub mod outbound;
