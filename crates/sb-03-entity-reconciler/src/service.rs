//! # Entity Reconciler Service
//!
//! Drains scanner streams and applies the domain rules cell by cell.
//! Malformed cells are logged and skipped; a scan failure aborts the call.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use sb_01_record_codec::{site_from_cell, RecordId, SiteRecord};
use sb_02_ledger_scanner::{CellSelector, LedgerScannerApi};
use shared_types::{ChainConfig, Script, ScriptInfo};
use tracing::{debug, info, warn};

use crate::domain::{
    blog_post, eth_owner_lock, Balance, Post, ReconcileError, SiteResolution, SiteResolver,
};
use crate::ports::inbound::EntityReconcilerApi;

pub struct EntityReconciler {
    scanner: Arc<dyn LedgerScannerApi>,
    spore: ScriptInfo,
    cluster: ScriptInfo,
    omnilock: ScriptInfo,
    resolution: SiteResolution,
}

impl EntityReconciler {
    pub fn new(scanner: Arc<dyn LedgerScannerApi>, config: &ChainConfig) -> Self {
        Self {
            scanner,
            spore: config.spore.clone(),
            cluster: config.cluster.clone(),
            omnilock: config.omnilock.clone(),
            resolution: SiteResolution::default(),
        }
    }

    pub fn with_resolution(mut self, resolution: SiteResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn resolution(&self) -> SiteResolution {
        self.resolution
    }

    /// Omnilock owned by an Ethereum address under this deployment.
    pub fn owner_lock_for(&self, address: &[u8; 20]) -> Script {
        eth_owner_lock(&self.omnilock, address)
    }

    async fn collect_sites(
        &self,
        selector: CellSelector,
    ) -> Result<Vec<SiteRecord>, ReconcileError> {
        let mut stream = self.scanner.scan(selector);
        let mut resolver = SiteResolver::new(self.resolution);
        let mut skipped = 0usize;

        while let Some(item) = stream.next().await {
            let cell = item?;
            match site_from_cell(&cell) {
                Ok(site) => resolver.observe(site, cell.chain_position()),
                Err(e) => {
                    skipped += 1;
                    warn!(out_point = ?cell.out_point, error = %e, "skipping malformed cluster cell");
                }
            }
        }

        debug!(sites = resolver.len(), skipped, "sites reconciled");
        Ok(resolver.finish())
    }
}

#[async_trait]
impl EntityReconcilerApi for EntityReconciler {
    async fn list_sites(&self, type_args: &[u8]) -> Result<Vec<SiteRecord>, ReconcileError> {
        let selector = CellSelector::by_type(self.cluster.script(type_args.to_vec()));
        self.collect_sites(selector).await
    }

    async fn list_posts(
        &self,
        cluster_id: &RecordId,
        owner_lock: Option<Script>,
    ) -> Result<Vec<Post>, ReconcileError> {
        let mut selector = CellSelector::by_type(self.spore.script(Vec::new()));
        if let Some(lock) = owner_lock {
            selector = selector.owned_by(lock);
        }

        let mut stream = self.scanner.scan(selector);
        let mut posts = Vec::new();
        let mut seen = 0usize;

        while let Some(item) = stream.next().await {
            let cell = item?;
            seen += 1;
            match blog_post(&cell, Some(cluster_id)) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(e) => {
                    warn!(out_point = ?cell.out_point, error = %e, "skipping malformed spore cell");
                }
            }
        }

        info!(site = %cluster_id, seen, posts = posts.len(), "posts reconciled");
        Ok(posts)
    }

    async fn get_site(&self, id: &RecordId) -> Result<Option<SiteRecord>, ReconcileError> {
        let selector = CellSelector::by_type(self.cluster.script(id.0.clone())).exact();
        let sites = self.collect_sites(selector).await?;
        Ok(sites.into_iter().find(|site| &site.id == id))
    }

    async fn get_post(&self, id: &RecordId) -> Result<Option<Post>, ReconcileError> {
        let selector = CellSelector::by_type(self.spore.script(id.0.clone())).exact();
        let mut stream = self.scanner.scan(selector);

        while let Some(item) = stream.next().await {
            let cell = item?;
            match blog_post(&cell, None) {
                Ok(Some(post)) if &post.id == id => return Ok(Some(post)),
                Ok(_) => {}
                Err(e) => {
                    warn!(out_point = ?cell.out_point, error = %e, "skipping malformed spore cell");
                }
            }
        }

        debug!(post = %id, "no blog post found");
        Ok(None)
    }

    async fn get_capacity(&self, owner_lock: Script) -> Result<Balance, ReconcileError> {
        let mut stream = self.scanner.scan(CellSelector::plain_cells(owner_lock));
        let mut balance = Balance::default();

        while let Some(item) = stream.next().await {
            balance.absorb(&item?);
        }

        debug!(shannons = balance.shannons, cells = balance.cells, "capacity summed");
        Ok(balance)
    }
}
