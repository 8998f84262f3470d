//! # Transaction Signer (SB-04)
//!
//! Seals an unsigned [`TransactionSkeleton`] with signatures from an external
//! Ethereum-style wallet through the Omnilock lock script.
//!
//! ## Guarantees
//!
//! - Signing entries depend only on the skeleton, never on the wallet.
//! - Each distinct message is signed once per pass; inputs sharing a lock
//!   receive identical witness bytes.
//! - Recovery bytes are normalized to `{0, 1}` before packing.
//! - All-or-nothing: a wallet failure aborts the pass and the caller's
//!   skeleton is never modified.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): entries, witness layout, EIP-191 helpers
//! - **Ports Layer** (`ports/`): `TransactionSignerApi`, `MessageSigner`
//! - **Adapters Layer** (`adapters/`): `LocalEthSigner`
//! - **Service Layer** (`service.rs`): the signing pass

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::local::LocalEthSigner;
pub use domain::{
    ensure_single_input_groups, fill_placeholder_witnesses, normalize_recovery_id, pack_omnilock_lock, parse_signature,
    personal_message_hash, placeholder_witness, prepare_signing_entries, recover_personal_signer,
    SignerError, SigningEntry, SigningEntryKind, TransactionSkeleton, WalletError,
    OMNILOCK_LOCK_LEN, SIGNATURE_LEN,
};
pub use ports::inbound::TransactionSignerApi;
pub use ports::outbound::MessageSigner;
pub use service::TransactionSigner;
