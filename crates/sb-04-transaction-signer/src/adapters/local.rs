//! In-process wallet holding a secp256k1 key.
//!
//! Behaves like a browser wallet's `personal_sign`: EIP-191 digest, `v` in
//! 27/28 form.

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use shared_types::hex_serde;

use crate::domain::{address_from_pubkey, personal_message_hash, Address, WalletError};
use crate::ports::outbound::MessageSigner;

pub struct LocalEthSigner {
    key: SigningKey,
}

impl LocalEthSigner {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// From a 32-byte hex private key, with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self, WalletError> {
        let bytes = hex_serde::decode_prefixed(private_key.trim())
            .map_err(|e| WalletError::Key(e.to_string()))?;
        let key = SigningKey::from_slice(&bytes).map_err(|e| WalletError::Key(e.to_string()))?;
        Ok(Self::new(key))
    }

    pub fn address(&self) -> Address {
        address_from_pubkey(self.key.verifying_key())
    }
}

impl std::fmt::Debug for LocalEthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEthSigner")
            .field("address", &hex_serde::encode_prefixed(&self.address()))
            .finish()
    }
}

#[async_trait]
impl MessageSigner for LocalEthSigner {
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        let digest = personal_message_hash(message);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| WalletError::Key(e.to_string()))?;

        let mut out = signature.to_bytes().to_vec();
        out.push(recovery_id.to_byte() + 27);
        Ok(out)
    }
}
