//! # Domain Entities
//!
//! The unsigned skeleton handed over by the cell builders and the signing
//! entries derived from it.

use serde::{Deserialize, Serialize};
use shared_types::hex_serde;
use shared_types::{Cell, CellDep, CellInput, CellOutput, Hash, Transaction};

/// What a signing entry's signature is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningEntryKind {
    /// Goes into the `lock` field of the witness at `index`.
    WitnessArgsLock,
    /// Produced by another lock; the signer leaves it alone.
    Other,
}

/// One message that must be signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningEntry {
    pub kind: SigningEntryKind,
    pub index: usize,
    #[serde(with = "hex_serde::hash")]
    pub message: Hash,
}

/// An unsigned transaction with resolved inputs.
///
/// Inputs are full cells so the signer can see their locks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionSkeleton {
    pub cell_deps: Vec<CellDep>,
    #[serde(with = "hex_serde::hash_vec")]
    pub header_deps: Vec<Hash>,
    pub inputs: Vec<Cell>,
    /// `since` of the input at the same index; inputs past the end use 0.
    #[serde(with = "hex_serde::uint64_vec")]
    pub since: Vec<u64>,
    pub outputs: Vec<CellOutput>,
    #[serde(with = "hex_serde::bytes_vec")]
    pub outputs_data: Vec<Vec<u8>>,
    #[serde(with = "hex_serde::bytes_vec")]
    pub witnesses: Vec<Vec<u8>>,
    /// Entries added by other locks.
    pub signing_entries: Vec<SigningEntry>,
}

impl TransactionSkeleton {
    /// The transaction this skeleton describes, witnesses as they stand.
    pub fn to_transaction(&self) -> Transaction {
        Transaction {
            version: 0,
            cell_deps: self.cell_deps.clone(),
            header_deps: self.header_deps.clone(),
            inputs: self
                .inputs
                .iter()
                .enumerate()
                .map(|(i, cell)| CellInput {
                    since: self.since.get(i).copied().unwrap_or(0),
                    previous_output: cell.out_point,
                })
                .collect(),
            outputs: self.outputs.clone(),
            outputs_data: self.outputs_data.clone(),
            witnesses: self.witnesses.clone(),
        }
    }

    pub fn tx_hash(&self) -> Hash {
        self.to_transaction().hash()
    }
}

/// Packed `OmniLockWitnessLock` bytes, reusable for every slot signing the
/// same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedWitness(pub Vec<u8>);
