//! Ethereum personal-sign helpers.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use super::errors::SignerError;
use super::witness::SIGNATURE_LEN;

pub type Address = [u8; 20];

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// EIP-191 `personal_sign` digest of `message`.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()).as_bytes());
    hasher.update(message);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// Address of a secp256k1 public key: last 20 bytes of keccak256(x ‖ y).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the address that personal-signed `message`.
///
/// Accepts `v` in either the 0/1 or the 27/28 form.
pub fn recover_personal_signer(
    message: &[u8],
    signature: &[u8; SIGNATURE_LEN],
) -> Result<Address, SignerError> {
    let v = match signature[64] {
        0 | 27 => 0,
        1 | 28 => 1,
        other => {
            return Err(SignerError::InvalidSignature(format!(
                "recovery id {other}"
            )))
        }
    };
    let recovery_id = RecoveryId::try_from(v)
        .map_err(|_| SignerError::InvalidSignature(format!("recovery id {v}")))?;
    let sig = Signature::from_slice(&signature[..64])
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;

    let digest = personal_message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
    Ok(address_from_pubkey(&key))
}
