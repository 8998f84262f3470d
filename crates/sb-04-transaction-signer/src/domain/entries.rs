//! # Signing Entries
//!
//! Inputs are grouped by lock script. Every Omnilock group signs one message:
//!
//! ```text
//! message = ckb_hash(
//!     tx_hash
//!     ‖ for each witness of the group:        len(u64 LE) ‖ witness
//!     ‖ for each witness past the inputs:     len(u64 LE) ‖ witness
//! )
//! ```
//!
//! Each input of the group gets an entry carrying that message, so a group of
//! N inputs yields N entries but only one distinct message.

use shared_types::{CkbHasher, Hash, Script, ScriptInfo};

use super::entities::{SigningEntry, SigningEntryKind, TransactionSkeleton};
use super::errors::SignerError;
use super::witness::placeholder_witness;

/// Inputs grouped by identical lock, in order of first appearance.
fn lock_groups<'a>(skeleton: &'a TransactionSkeleton, omnilock: &ScriptInfo) -> Vec<(&'a Script, Vec<usize>)> {
    let mut groups: Vec<(&Script, Vec<usize>)> = Vec::new();
    for (index, cell) in skeleton.inputs.iter().enumerate() {
        let lock = &cell.output.lock;
        if !omnilock.matches(lock) {
            continue;
        }
        match groups.iter_mut().find(|(l, _)| *l == lock) {
            Some((_, indices)) => indices.push(index),
            None => groups.push((lock, vec![index])),
        }
    }
    groups
}

fn hash_witness(hasher: &mut CkbHasher, witness: &[u8]) {
    hasher.update(&(witness.len() as u64).to_le_bytes());
    hasher.update(witness);
}

/// Derive the Omnilock signing entries, ordered by input index.
///
/// Deterministic in the skeleton alone.
pub fn prepare_signing_entries(
    skeleton: &TransactionSkeleton,
    omnilock: &ScriptInfo,
) -> Result<Vec<SigningEntry>, SignerError> {
    let tx_hash: Hash = skeleton.tx_hash();
    let input_count = skeleton.inputs.len();
    let mut entries = Vec::new();

    for (_, indices) in lock_groups(skeleton, omnilock) {
        let mut hasher = CkbHasher::new();
        hasher.update(&tx_hash);
        for &index in &indices {
            let witness = skeleton
                .witnesses
                .get(index)
                .ok_or(SignerError::MissingWitness { index })?;
            hash_witness(&mut hasher, witness);
        }
        for witness in skeleton.witnesses.iter().skip(input_count) {
            hash_witness(&mut hasher, witness);
        }
        let message = hasher.finalize();

        entries.extend(indices.into_iter().map(|index| SigningEntry {
            kind: SigningEntryKind::WitnessArgsLock,
            index,
            message,
        }));
    }

    entries.sort_by_key(|entry| entry.index);
    Ok(entries)
}

/// Fail when any Omnilock lock guards more than one input.
///
/// Checked before a wallet is prompted for transactions headed to the chain.
pub fn ensure_single_input_groups(
    skeleton: &TransactionSkeleton,
    omnilock: &ScriptInfo,
) -> Result<(), SignerError> {
    for (_, indices) in lock_groups(skeleton, omnilock) {
        if let [first, second, ..] = indices[..] {
            return Err(SignerError::SharedLockGroup { first, second });
        }
    }
    Ok(())
}

/// Give every Omnilock group a placeholder witness in its first slot.
///
/// Slots are created up to the input count; non-empty slots are kept.
pub fn fill_placeholder_witnesses(skeleton: &mut TransactionSkeleton, omnilock: &ScriptInfo) {
    if skeleton.witnesses.len() < skeleton.inputs.len() {
        skeleton.witnesses.resize(skeleton.inputs.len(), Vec::new());
    }
    let firsts: Vec<usize> = lock_groups(skeleton, omnilock)
        .into_iter()
        .filter_map(|(_, indices)| indices.first().copied())
        .collect();
    for index in firsts {
        if skeleton.witnesses[index].is_empty() {
            skeleton.witnesses[index] = placeholder_witness();
        }
    }
}
