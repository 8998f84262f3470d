//! # CKB Hashing
//!
//! Blake2b-256 with the `ckb-default-hash` personalization, used for
//! transaction hashes and signing messages.

use crate::entities::Hash;

/// Personalization string of the CKB default hash.
pub const CKB_HASH_PERSONALIZATION: &[u8; 16] = b"ckb-default-hash";

/// Incremental CKB hasher.
#[derive(Debug, Clone)]
pub struct CkbHasher {
    state: blake2b_simd::State,
}

impl CkbHasher {
    /// Create a hasher with the CKB parameters.
    pub fn new() -> Self {
        let state = blake2b_simd::Params::new()
            .hash_length(32)
            .personal(CKB_HASH_PERSONALIZATION)
            .to_state();
        Self { state }
    }

    /// Feed bytes into the hasher.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.state.update(data);
        self
    }

    /// Finish and return the 32-byte digest.
    pub fn finalize(&self) -> Hash {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.state.finalize().as_bytes());
        out
    }
}

impl Default for CkbHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot CKB hash.
pub fn ckb_hash(data: &[u8]) -> Hash {
    CkbHasher::new().update(data).finalize()
}
