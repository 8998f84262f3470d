//! # Core Ledger Entities
//!
//! CKB cells, scripts and transactions as seen by the blog core.
//!
//! Every entity that is hashed on chain implements `pack()` with the exact
//! molecule layout, and every entity that crosses the JSON-RPC boundary
//! serializes to the node's JSON shape (hex strings, hex quantities).

use serde::{Deserialize, Serialize};

use crate::errors::PackingError;
use crate::hashing::ckb_hash;
use crate::hex_serde;
use crate::molecule::{
    pack_bytes, pack_bytes_opt, pack_dynvec, pack_fixvec, pack_table, unpack_bytes_opt,
    unpack_table,
};

/// A 32-byte hash (CKB blake2b-256).
pub type Hash = [u8; 32];

/// Amount of CKBytes in shannons (1 CKB = 10^8 shannons).
pub type Capacity = u64;

/// Shannons per CKB.
pub const SHANNONS_PER_CKB: u64 = 100_000_000;

// =============================================================================
// SCRIPTS
// =============================================================================

/// How a script's `code_hash` is matched against cell deps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    #[default]
    Data,
    Type,
    Data1,
    Data2,
}

impl HashType {
    /// Molecule byte for this hash type.
    pub fn to_byte(self) -> u8 {
        match self {
            HashType::Data => 0,
            HashType::Type => 1,
            HashType::Data1 => 2,
            HashType::Data2 => 4,
        }
    }

    /// Parse the molecule byte.
    pub fn from_byte(value: u8) -> Result<Self, PackingError> {
        match value {
            0 => Ok(HashType::Data),
            1 => Ok(HashType::Type),
            2 => Ok(HashType::Data1),
            4 => Ok(HashType::Data2),
            _ => Err(PackingError::UnknownVariant {
                kind: "hash type",
                value,
            }),
        }
    }
}

/// A lock or type script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(with = "hex_serde::hash")]
    pub code_hash: Hash,
    pub hash_type: HashType,
    #[serde(with = "hex_serde::bytes")]
    pub args: Vec<u8>,
}

impl Script {
    pub fn new(code_hash: Hash, hash_type: HashType, args: Vec<u8>) -> Self {
        Self {
            code_hash,
            hash_type,
            args,
        }
    }

    /// Molecule `Script` table.
    pub fn pack(&self) -> Vec<u8> {
        pack_table(&[
            self.code_hash.to_vec(),
            vec![self.hash_type.to_byte()],
            pack_bytes(&self.args),
        ])
    }

    /// Hash of the packed script.
    pub fn hash(&self) -> Hash {
        ckb_hash(&self.pack())
    }

    /// Same code hash and hash type, ignoring args.
    pub fn same_family(&self, other: &Script) -> bool {
        self.code_hash == other.code_hash && self.hash_type == other.hash_type
    }

    /// `0x`-prefixed hex of the args (the record id for Spore/Cluster types).
    pub fn args_hex(&self) -> String {
        hex_serde::encode_prefixed(&self.args)
    }
}

// =============================================================================
// CELLS
// =============================================================================

/// Reference to a transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OutPoint {
    #[serde(with = "hex_serde::hash")]
    pub tx_hash: Hash,
    #[serde(with = "hex_serde::uint32")]
    pub index: u32,
}

impl OutPoint {
    pub fn new(tx_hash: Hash, index: u32) -> Self {
        Self { tx_hash, index }
    }

    /// Molecule `OutPoint` struct (36 bytes).
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(36);
        out.extend_from_slice(&self.tx_hash);
        out.extend_from_slice(&self.index.to_le_bytes());
        out
    }
}

/// Output portion of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellOutput {
    #[serde(with = "hex_serde::uint64")]
    pub capacity: Capacity,
    pub lock: Script,
    #[serde(rename = "type")]
    pub type_: Option<Script>,
}

impl CellOutput {
    /// Molecule `CellOutput` table.
    pub fn pack(&self) -> Vec<u8> {
        pack_table(&[
            self.capacity.to_le_bytes().to_vec(),
            self.lock.pack(),
            self.type_.as_ref().map(Script::pack).unwrap_or_default(),
        ])
    }
}

/// A live cell as returned by the indexer.
///
/// `block_number` and `tx_index` locate the creating transaction on chain
/// when the indexer reports them; they order historical versions of a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub out_point: OutPoint,
    pub output: CellOutput,
    #[serde(with = "hex_serde::bytes")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub tx_index: Option<u32>,
}

impl Cell {
    /// Chain position used for "most recent" ordering.
    pub fn chain_position(&self) -> Option<(u64, u32, u32)> {
        match (self.block_number, self.tx_index) {
            (Some(block), Some(tx)) => Some((block, tx, self.out_point.index)),
            _ => None,
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Transaction input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellInput {
    #[serde(with = "hex_serde::uint64")]
    pub since: u64,
    pub previous_output: OutPoint,
}

impl CellInput {
    /// Molecule `CellInput` struct (44 bytes).
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(44);
        out.extend_from_slice(&self.since.to_le_bytes());
        out.extend_from_slice(&self.previous_output.pack());
        out
    }
}

/// How a cell dep is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepType {
    #[default]
    Code,
    DepGroup,
}

impl DepType {
    pub fn to_byte(self) -> u8 {
        match self {
            DepType::Code => 0,
            DepType::DepGroup => 1,
        }
    }
}

/// Script code dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellDep {
    pub out_point: OutPoint,
    pub dep_type: DepType,
}

impl CellDep {
    /// Molecule `CellDep` struct (37 bytes).
    pub fn pack(&self) -> Vec<u8> {
        let mut out = self.out_point.pack();
        out.push(self.dep_type.to_byte());
        out
    }
}

/// A complete CKB transaction in node JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "hex_serde::uint32")]
    pub version: u32,
    pub cell_deps: Vec<CellDep>,
    #[serde(with = "hex_serde::hash_vec")]
    pub header_deps: Vec<Hash>,
    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,
    #[serde(with = "hex_serde::bytes_vec")]
    pub outputs_data: Vec<Vec<u8>>,
    #[serde(with = "hex_serde::bytes_vec")]
    pub witnesses: Vec<Vec<u8>>,
}

impl Transaction {
    /// Molecule `RawTransaction` (everything except witnesses).
    pub fn pack_raw(&self) -> Vec<u8> {
        let cell_deps: Vec<Vec<u8>> = self.cell_deps.iter().map(CellDep::pack).collect();
        let header_deps: Vec<Vec<u8>> = self.header_deps.iter().map(|h| h.to_vec()).collect();
        let inputs: Vec<Vec<u8>> = self.inputs.iter().map(CellInput::pack).collect();
        let outputs: Vec<Vec<u8>> = self.outputs.iter().map(CellOutput::pack).collect();
        let outputs_data: Vec<Vec<u8>> = self.outputs_data.iter().map(|d| pack_bytes(d)).collect();

        pack_table(&[
            self.version.to_le_bytes().to_vec(),
            pack_fixvec(&cell_deps),
            pack_fixvec(&header_deps),
            pack_fixvec(&inputs),
            pack_dynvec(&outputs),
            pack_dynvec(&outputs_data),
        ])
    }

    /// Transaction hash: CKB hash of the raw transaction.
    pub fn hash(&self) -> Hash {
        ckb_hash(&self.pack_raw())
    }
}

// =============================================================================
// WITNESSES
// =============================================================================

/// The standard witness envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WitnessArgs {
    pub lock: Option<Vec<u8>>,
    pub input_type: Option<Vec<u8>>,
    pub output_type: Option<Vec<u8>>,
}

impl WitnessArgs {
    /// Witness carrying only a lock field.
    pub fn with_lock(lock: Vec<u8>) -> Self {
        Self {
            lock: Some(lock),
            ..Self::default()
        }
    }

    /// Molecule `WitnessArgs` table.
    pub fn pack(&self) -> Vec<u8> {
        pack_table(&[
            pack_bytes_opt(self.lock.as_deref()),
            pack_bytes_opt(self.input_type.as_deref()),
            pack_bytes_opt(self.output_type.as_deref()),
        ])
    }

    /// Parse a packed `WitnessArgs`.
    pub fn unpack(data: &[u8]) -> Result<Self, PackingError> {
        let fields = unpack_table(data, 3)?;
        Ok(Self {
            lock: unpack_bytes_opt(fields[0])?.map(<[u8]>::to_vec),
            input_type: unpack_bytes_opt(fields[1])?.map(<[u8]>::to_vec),
            output_type: unpack_bytes_opt(fields[2])?.map(<[u8]>::to_vec),
        })
    }
}
