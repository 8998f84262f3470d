//! # Transaction Signer Service
//!
//! One signing pass:
//!
//! 1. Derive the Omnilock entries from the skeleton.
//! 2. Walk them in index order, signing each distinct message once.
//! 3. Stage the sealed witness for each slot.
//! 4. Apply all staged witnesses to a copy and return it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{hex_serde, ChainConfig, Hash, ScriptInfo, Transaction};
use tracing::{debug, info, warn};

use crate::domain::{
    pack_omnilock_lock, parse_signature, prepare_signing_entries, seal_slot, SignedWitness,
    SignerError, SigningEntry, SigningEntryKind, TransactionSkeleton,
};
use crate::ports::inbound::TransactionSignerApi;
use crate::ports::outbound::MessageSigner;

pub struct TransactionSigner {
    wallet: Arc<dyn MessageSigner>,
    omnilock: ScriptInfo,
}

impl TransactionSigner {
    pub fn new(wallet: Arc<dyn MessageSigner>, omnilock: ScriptInfo) -> Self {
        Self { wallet, omnilock }
    }

    pub fn from_config(wallet: Arc<dyn MessageSigner>, config: &ChainConfig) -> Self {
        Self::new(wallet, config.omnilock.clone())
    }

    /// Entries this signer would act on, plus foreign entries carried by the skeleton.
    pub fn signing_entries(
        &self,
        skeleton: &TransactionSkeleton,
    ) -> Result<Vec<SigningEntry>, SignerError> {
        let mut entries = prepare_signing_entries(skeleton, &self.omnilock)?;
        entries.extend(
            skeleton
                .signing_entries
                .iter()
                .filter(|entry| entry.kind == SigningEntryKind::Other)
                .cloned(),
        );
        Ok(entries)
    }

    async fn signed_witness(&self, message: &Hash) -> Result<SignedWitness, SignerError> {
        let raw = self.wallet.sign_message(message).await.map_err(|e| {
            warn!(message = %hex_serde::encode_prefixed(message), error = %e, "wallet refused to sign");
            SignerError::from(e)
        })?;
        let signature = parse_signature(&raw)?;
        Ok(pack_omnilock_lock(&signature))
    }
}

#[async_trait]
impl TransactionSignerApi for TransactionSigner {
    async fn sign(&self, skeleton: &TransactionSkeleton) -> Result<Transaction, SignerError> {
        let entries = self.signing_entries(skeleton)?;

        // Scoped to this pass.
        let mut cache: HashMap<Hash, SignedWitness> = HashMap::new();
        let mut staged: Vec<(usize, Vec<u8>)> = Vec::with_capacity(entries.len());

        for entry in &entries {
            if entry.kind != SigningEntryKind::WitnessArgsLock {
                debug!(index = entry.index, "passing through foreign signing entry");
                continue;
            }

            let lock = match cache.get(&entry.message) {
                Some(lock) => lock.clone(),
                None => {
                    let lock = self.signed_witness(&entry.message).await?;
                    cache.insert(entry.message, lock.clone());
                    lock
                }
            };

            let slot = skeleton
                .witnesses
                .get(entry.index)
                .ok_or(SignerError::MissingWitness { index: entry.index })?;
            staged.push((entry.index, seal_slot(slot, &lock, entry.index)?));
        }

        let mut tx = skeleton.to_transaction();
        for (index, witness) in staged {
            tx.witnesses[index] = witness;
        }

        info!(
            tx_hash = %hex_serde::encode_prefixed(&tx.hash()),
            entries = entries.len(),
            signatures = cache.len(),
            "transaction signed"
        );
        Ok(tx)
    }
}
