//! # Omnilock Witnesses
//!
//! ```text
//! OmniLockWitnessLock = table {
//!     signature:     BytesOpt,     // 65-byte r ‖ s ‖ v
//!     omni_identity: IdentityOpt,  // unused
//!     preimage:      BytesOpt,     // unused
//! }
//! ```
//!
//! The packed lock goes into `WitnessArgs.lock` of the signed slot. Before
//! signing, the slot holds a lock of the same length made of zero bytes; the
//! lock script rebuilds the message the same way.

use shared_types::molecule::{pack_bytes_opt, pack_table};
use shared_types::WitnessArgs;

use super::entities::SignedWitness;
use super::errors::SignerError;

/// Length of a recoverable secp256k1 signature.
pub const SIGNATURE_LEN: usize = 65;

/// Length of a packed `OmniLockWitnessLock` carrying only a signature.
pub const OMNILOCK_LOCK_LEN: usize = 16 + 4 + SIGNATURE_LEN;

/// Bring the recovery byte into `{0, 1}` form: wallets return 27/28.
pub fn normalize_recovery_id(signature: &mut [u8; SIGNATURE_LEN]) {
    let v = &mut signature[SIGNATURE_LEN - 1];
    if *v >= 27 {
        *v -= 27;
    }
}

/// Check length and normalize.
pub fn parse_signature(raw: &[u8]) -> Result<[u8; SIGNATURE_LEN], SignerError> {
    let mut signature = <[u8; SIGNATURE_LEN]>::try_from(raw).map_err(|_| {
        SignerError::InvalidSignature(format!(
            "expected {SIGNATURE_LEN} bytes, got {}",
            raw.len()
        ))
    })?;
    normalize_recovery_id(&mut signature);
    Ok(signature)
}

/// Packed `OmniLockWitnessLock` with only the signature set.
pub fn pack_omnilock_lock(signature: &[u8; SIGNATURE_LEN]) -> SignedWitness {
    SignedWitness(pack_table(&[
        pack_bytes_opt(Some(&signature[..])),
        Vec::new(),
        Vec::new(),
    ]))
}

/// Witness whose lock is all zeros, sized like the signed one.
///
/// Fees and the signing message are computed over this placeholder.
pub fn placeholder_witness() -> Vec<u8> {
    WitnessArgs::with_lock(vec![0u8; OMNILOCK_LOCK_LEN]).pack()
}

/// Put `lock` into the `WitnessArgs` held in `slot`, keeping its type fields.
pub fn seal_slot(slot: &[u8], lock: &SignedWitness, index: usize) -> Result<Vec<u8>, SignerError> {
    let mut args = if slot.is_empty() {
        WitnessArgs::default()
    } else {
        WitnessArgs::unpack(slot).map_err(|e| SignerError::MalformedWitness {
            index,
            reason: e.to_string(),
        })?
    };
    args.lock = Some(lock.0.clone());
    Ok(args.pack())
}
