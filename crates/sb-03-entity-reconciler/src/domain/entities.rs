//! # Domain Entities

use std::fmt;

use sb_01_record_codec::RecordId;
use serde::{Deserialize, Serialize};
use shared_types::{Capacity, OutPoint, SHANNONS_PER_CKB};

/// A blog post ready for display.
///
/// `out_point` is the spend handle for the cell currently holding the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: RecordId,
    pub cluster_id: Option<RecordId>,
    pub title: String,
    pub content: String,
    pub out_point: OutPoint,
}

/// Which cell wins when several cells carry the same site id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteResolution {
    /// Highest `(block_number, tx_index, out_point.index)`; ties and cells
    /// without a position fall back to scan order.
    #[default]
    MostRecent,
    /// Whatever the scan yields last.
    LastObserved,
}

/// Spendable capacity held in plain cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub shannons: Capacity,
    pub cells: usize,
}

impl Balance {
    /// Whole CKB, truncating the fractional part.
    pub fn whole_ckb(&self) -> u64 {
        self.shannons / SHANNONS_PER_CKB
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:08} CKB",
            self.shannons / SHANNONS_PER_CKB,
            self.shannons % SHANNONS_PER_CKB
        )
    }
}
