//! # Inbound Port
//!
//! Read-side API consumed by the runtime and the CLI.

use async_trait::async_trait;
use sb_01_record_codec::{RecordId, SiteRecord};
use shared_types::Script;

use crate::domain::{Balance, Post, ReconcileError};

/// Typed view over the blog records on chain.
///
/// Every method runs one fresh scan. For an unchanged ledger the results are
/// identical across calls.
#[async_trait]
pub trait EntityReconcilerApi: Send + Sync {
    /// One site per distinct id among Cluster cells whose args start with
    /// `type_args` (`&[]` = all sites).
    async fn list_sites(&self, type_args: &[u8]) -> Result<Vec<SiteRecord>, ReconcileError>;

    /// Blog posts of `cluster_id`, optionally restricted to one owner, in
    /// scan order.
    async fn list_posts(
        &self,
        cluster_id: &RecordId,
        owner_lock: Option<Script>,
    ) -> Result<Vec<Post>, ReconcileError>;

    /// The site with exactly this id.
    async fn get_site(&self, id: &RecordId) -> Result<Option<SiteRecord>, ReconcileError>;

    /// The first valid blog post among cells with this spore id.
    async fn get_post(&self, id: &RecordId) -> Result<Option<Post>, ReconcileError>;

    /// Capacity in the owner's plain cells.
    async fn get_capacity(&self, owner_lock: Script) -> Result<Balance, ReconcileError>;
}
