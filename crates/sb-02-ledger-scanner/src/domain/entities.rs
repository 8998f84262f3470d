//! # Scan Selectors
//!
//! A [`CellSelector`] describes which live cells a caller wants. It is turned
//! into the indexer's `search_key` JSON by [`CellSelector::to_search_key`].

use serde::{Deserialize, Serialize};
use shared_types::{Cell, Script};

use super::errors::ScanError;

/// Which script slot the indexer matches the search script against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Lock,
    Type,
}

/// How the search script's args are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Args are a prefix; `0x` selects the whole script family.
    #[default]
    Prefix,
    /// Args must match exactly.
    Exact,
}

/// What to scan for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellSelector {
    /// Type script (code hash, hash type, args). Its args are the `type_args`.
    pub type_script: Option<Script>,
    /// Restrict to cells owned by this lock.
    pub owner_lock: Option<Script>,
    /// Comparison mode for the primary search script.
    pub search_mode: SearchMode,
    /// Only cells with no type script and empty data.
    pub empty_type_only: bool,
}

impl CellSelector {
    /// Every cell of a type-script family whose args start with `type_script.args`.
    pub fn by_type(type_script: Script) -> Self {
        Self {
            type_script: Some(type_script),
            ..Self::default()
        }
    }

    /// Plain capacity cells (no type, no data) owned by `lock`.
    pub fn plain_cells(lock: Script) -> Self {
        Self {
            owner_lock: Some(lock),
            empty_type_only: true,
            ..Self::default()
        }
    }

    /// Restrict to cells locked by `lock`.
    pub fn owned_by(mut self, lock: Script) -> Self {
        self.owner_lock = Some(lock);
        self
    }

    /// Use exact args matching for the primary search script.
    pub fn exact(mut self) -> Self {
        self.search_mode = SearchMode::Exact;
        self
    }

    /// Build the indexer search key.
    ///
    /// With an owner lock, the lock is the search script and the type script
    /// moves into the filter. Otherwise the type script is searched directly.
    pub fn to_search_key(&self) -> Result<SearchKey, ScanError> {
        let mut filter = SearchFilter::default();
        if self.empty_type_only {
            filter.script_len_range = Some(EMPTY_RANGE);
            filter.output_data_len_range = Some(EMPTY_RANGE);
        }

        let (script, script_type) = match (&self.owner_lock, &self.type_script) {
            (Some(lock), type_script) => {
                if let Some(type_script) = type_script {
                    if self.empty_type_only {
                        return Err(ScanError::InvalidSelector(
                            "empty_type_only conflicts with a type script".to_string(),
                        ));
                    }
                    filter.script = Some(type_script.clone());
                }
                (lock.clone(), ScriptType::Lock)
            }
            (None, Some(type_script)) => {
                if self.empty_type_only {
                    return Err(ScanError::InvalidSelector(
                        "empty_type_only requires an owner lock".to_string(),
                    ));
                }
                (type_script.clone(), ScriptType::Type)
            }
            (None, None) => {
                return Err(ScanError::InvalidSelector(
                    "selector needs a type script or an owner lock".to_string(),
                ))
            }
        };

        Ok(SearchKey {
            script,
            script_type,
            script_search_mode: self.search_mode,
            filter: (!filter.is_empty()).then_some(filter),
            with_data: true,
        })
    }
}

/// `[0, 1)` length range: "empty".
const EMPTY_RANGE: [HexRange; 2] = [HexRange(0), HexRange(1)];

/// Indexer `search_key` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchKey {
    pub script: Script,
    pub script_type: ScriptType,
    pub script_search_mode: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    pub with_data: bool,
}

/// Secondary constraints applied by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_len_range: Option<[HexRange; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_data_len_range: Option<[HexRange; 2]>,
}

impl SearchFilter {
    fn is_empty(&self) -> bool {
        self.script.is_none()
            && self.script_len_range.is_none()
            && self.output_data_len_range.is_none()
    }
}

/// Range bound serialized as a hex quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRange(pub u64);

impl Serialize for HexRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#x}", self.0))
    }
}

/// One page of indexer results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellsPage {
    pub cells: Vec<Cell>,
    pub last_cursor: Option<String>,
}
