//! # Chain Configuration
//!
//! Script identities and RPC endpoints, passed explicitly to every scanner,
//! signer and gate. Defaults target the CKB testnet (Aggron4).
//!
//! ## Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SB_INDEXER_URL` | `indexer_url` |
//! | `SB_NODE_URL` | `node_url` |
//! | `SB_PAGE_SIZE` | `page_size` |
//! | `SB_RPC_TIMEOUT_SECS` | `rpc_timeout_secs` |

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entities::{CellDep, DepType, Hash, HashType, OutPoint, Script};
use crate::errors::ConfigError;
use crate::hex_serde;

/// Default testnet indexer endpoint.
pub const TESTNET_INDEXER_URL: &str = "https://testnet.ckb.dev/indexer";
/// Default testnet node endpoint.
pub const TESTNET_NODE_URL: &str = "https://testnet.ckb.dev/rpc";

const DEFAULT_PAGE_SIZE: u32 = 100;
const MAX_PAGE_SIZE: u32 = 10_000;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

/// Compile-time parse of a `0x`-prefixed 32-byte hex constant.
const fn hash_const(s: &str) -> Hash {
    let b = s.as_bytes();
    assert!(b.len() == 66, "hash constant must be 0x + 64 hex digits");
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        out[i] = (nibble(b[2 + 2 * i]) << 4) | nibble(b[3 + 2 * i]);
        i += 1;
    }
    out
}

/// Omnilock on testnet.
pub const TESTNET_OMNILOCK_CODE_HASH: Hash =
    hash_const("0xf329effd1c475a2978453c8600e1eaf0bc2087ee093c3ee64cc96ec6847752cb");
const TESTNET_OMNILOCK_DEP_TX: Hash =
    hash_const("0x27b62d8be8ed80b9f56ee0fe41355becdb6f6a40aeba82d3900434f43b1c8b60");

/// Spore type script on testnet.
pub const TESTNET_SPORE_CODE_HASH: Hash =
    hash_const("0x685a60219309029d01310311dba953d67029170ca4848a4ff638e57002130a0d");
const TESTNET_SPORE_DEP_TX: Hash =
    hash_const("0x5e8d2a517d50fd4bb4d01737a7952a1f1d35c8afc77240695bb569cd7d9d5a1f");

/// Cluster type script on testnet.
pub const TESTNET_CLUSTER_CODE_HASH: Hash =
    hash_const("0x0bbe768b519d8ea7b96d58f1182eb7e6ef96c541fbd9526975077ee09f049058");
const TESTNET_CLUSTER_DEP_TX: Hash =
    hash_const("0xcebb174d6e300e26074aea2f5dbd7f694bb4fe3de52b6dfe205e54f90164510a");

/// Identity of a deployed script plus the dep that loads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    #[serde(with = "hex_serde::hash")]
    pub code_hash: Hash,
    pub hash_type: HashType,
    pub cell_dep: CellDep,
}

impl ScriptInfo {
    fn code(code_hash: Hash, hash_type: HashType, dep_tx: Hash) -> Self {
        Self {
            code_hash,
            hash_type,
            cell_dep: CellDep {
                out_point: OutPoint::new(dep_tx, 0),
                dep_type: DepType::Code,
            },
        }
    }

    /// Build a script of this family with the given args.
    pub fn script(&self, args: Vec<u8>) -> Script {
        Script::new(self.code_hash, self.hash_type, args)
    }

    /// Whether `script` belongs to this family (args ignored).
    pub fn matches(&self, script: &Script) -> bool {
        script.code_hash == self.code_hash && script.hash_type == self.hash_type
    }
}

/// Complete chain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Indexer JSON-RPC endpoint.
    pub indexer_url: String,
    /// Node JSON-RPC endpoint.
    pub node_url: String,
    /// Spore (post) type script.
    pub spore: ScriptInfo,
    /// Cluster (site) type script.
    pub cluster: ScriptInfo,
    /// Omnilock, the lock script signed by the external wallet.
    pub omnilock: ScriptInfo,
    /// Cells requested per indexer page.
    pub page_size: u32,
    /// HTTP timeout for each RPC call.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

impl ChainConfig {
    /// CKB testnet (Aggron4) deployment.
    pub fn testnet() -> Self {
        Self {
            indexer_url: TESTNET_INDEXER_URL.to_string(),
            node_url: TESTNET_NODE_URL.to_string(),
            spore: ScriptInfo::code(
                TESTNET_SPORE_CODE_HASH,
                HashType::Data1,
                TESTNET_SPORE_DEP_TX,
            ),
            cluster: ScriptInfo::code(
                TESTNET_CLUSTER_CODE_HASH,
                HashType::Data1,
                TESTNET_CLUSTER_DEP_TX,
            ),
            omnilock: ScriptInfo::code(
                TESTNET_OMNILOCK_CODE_HASH,
                HashType::Type,
                TESTNET_OMNILOCK_DEP_TX,
            ),
            page_size: DEFAULT_PAGE_SIZE,
            rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
        }
    }

    /// Testnet defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::testnet();
        config.apply_env();
        config
    }

    /// Load a JSON config file; missing fields fall back to testnet values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `SB_*` environment overrides in place.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("SB_INDEXER_URL") {
            self.indexer_url = url;
        }
        if let Ok(url) = std::env::var("SB_NODE_URL") {
            self.node_url = url;
        }
        if let Ok(size) = std::env::var("SB_PAGE_SIZE") {
            match size.parse() {
                Ok(s) => self.page_size = s,
                Err(_) => warn!(value = %size, "SB_PAGE_SIZE is not a number, ignoring"),
            }
        }
        if let Ok(secs) = std::env::var("SB_RPC_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(s) => self.rpc_timeout_secs = s,
                Err(_) => warn!(value = %secs, "SB_RPC_TIMEOUT_SECS is not a number, ignoring"),
            }
        }
    }

    /// Reject configurations that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [("indexer", &self.indexer_url), ("node", &self.node_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint {
                    name,
                    url: url.clone(),
                });
            }
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}
