//! # Domain Layer
//!
//! Skeletons, signing entries, Omnilock witness packing and the Ethereum
//! personal-sign primitives they rely on.

pub mod entities;
pub mod entries;
pub mod errors;
pub mod eth;
pub mod witness;

pub use entities::{SignedWitness, SigningEntry, SigningEntryKind, TransactionSkeleton};
pub use entries::{
    ensure_single_input_groups, fill_placeholder_witnesses, prepare_signing_entries,
};
pub use errors::{SignerError, WalletError};
pub use eth::{address_from_pubkey, personal_message_hash, recover_personal_signer, Address};
pub use witness::{
    normalize_recovery_id, pack_omnilock_lock, parse_signature, placeholder_witness, seal_slot,
    OMNILOCK_LOCK_LEN, SIGNATURE_LEN,
};
