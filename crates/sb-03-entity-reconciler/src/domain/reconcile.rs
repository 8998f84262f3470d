//! # Reconciliation Rules
//!
//! Pure per-cell decisions: which cells are blog posts, which site version
//! wins, which cells count toward a balance.

use std::collections::HashMap;

use sb_01_record_codec::{parse_post_payload, post_from_cell, CodecError, RecordId, SiteRecord};
use shared_types::Cell;

use super::entities::{Balance, Post, SiteResolution};

/// Decide whether a Spore cell is a blog post of `site`.
///
/// Filters apply in order: content type, cluster id, payload. `site = None`
/// skips the cluster check (single-post lookup).
///
/// - `Err` when the cell data is not a Spore record.
/// - `Ok(None)` when the spore belongs to something else.
pub fn blog_post(cell: &Cell, site: Option<&RecordId>) -> Result<Option<Post>, CodecError> {
    let record = post_from_cell(cell)?;
    if !record.is_json() {
        return Ok(None);
    }
    if let Some(site) = site {
        if !record.belongs_to(site) {
            return Ok(None);
        }
    }
    let Some(payload) = parse_post_payload(&record.content) else {
        return Ok(None);
    };
    Ok(Some(Post {
        id: record.id,
        cluster_id: record.cluster_id,
        title: payload.title,
        content: payload.content,
        out_point: cell.out_point,
    }))
}

/// Chain position of a cell, `None` when the indexer omitted it.
type Position = Option<(u64, u32, u32)>;

/// Collapses site versions to one record per id.
///
/// Output order is the order in which each id was first observed.
#[derive(Debug)]
pub struct SiteResolver {
    policy: SiteResolution,
    slots: Vec<(SiteRecord, Position)>,
    by_id: HashMap<RecordId, usize>,
}

impl SiteResolver {
    pub fn new(policy: SiteResolution) -> Self {
        Self {
            policy,
            slots: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Feed the next record in scan order.
    pub fn observe(&mut self, record: SiteRecord, position: Position) {
        match self.by_id.get(&record.id) {
            Some(&slot) => {
                let current = &mut self.slots[slot];
                let replace = match self.policy {
                    SiteResolution::LastObserved => true,
                    // Option orders None below Some, so any positioned cell
                    // beats an unpositioned one; equal positions go to the later cell.
                    SiteResolution::MostRecent => position >= current.1,
                };
                if replace {
                    *current = (record, position);
                }
            }
            None => {
                self.by_id.insert(record.id.clone(), self.slots.len());
                self.slots.push((record, position));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn finish(self) -> Vec<SiteRecord> {
        self.slots.into_iter().map(|(record, _)| record).collect()
    }
}

/// A cell with no type script and empty data.
pub fn is_plain_cell(cell: &Cell) -> bool {
    cell.output.type_.is_none() && cell.data.is_empty()
}

impl Balance {
    /// Count a plain cell; other cells are ignored.
    pub fn absorb(&mut self, cell: &Cell) {
        if is_plain_cell(cell) {
            self.shannons = self.shannons.saturating_add(cell.output.capacity);
            self.cells += 1;
        }
    }
}
