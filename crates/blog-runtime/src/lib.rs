//! # Spore-Blog Runtime
//!
//! Composition root for the subsystem crates.
//!
//! ```text
//! read:  IndexerRpcClient → LedgerScanner → EntityReconciler → sites / posts / balance
//! write: skeleton → TransactionSigner(wallet) → SubmissionGate → NodeRpcClient → tx hash
//! ```
//!
//! Every adapter receives the same [`ChainConfig`]; there is no global state.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use sb_01_record_codec::{RecordId, SiteRecord};
use sb_02_ledger_scanner::{IndexerClient, IndexerRpcClient, LedgerScanner};
use sb_03_entity_reconciler::{
    eth_owner_lock, parse_eth_address, Balance, EntityReconciler, EntityReconcilerApi, Post,
    SiteResolution,
};
use sb_04_transaction_signer::{
    ensure_single_input_groups, fill_placeholder_witnesses, MessageSigner, TransactionSigner,
    TransactionSignerApi, TransactionSkeleton,
};
use sb_05_submission_gate::{NodeClient, NodeRpcClient, SubmissionGate, SubmissionGateApi};
use shared_types::{ChainConfig, Hash, Transaction};
use tracing::info;

pub use config::load_config;

/// The wired read and write paths.
pub struct BlogRuntime {
    config: ChainConfig,
    reconciler: Arc<dyn EntityReconcilerApi>,
    gate: Arc<dyn SubmissionGateApi>,
}

impl BlogRuntime {
    /// Wire against the live endpoints named in `config`.
    pub fn new(config: ChainConfig) -> Self {
        let indexer = Arc::new(IndexerRpcClient::from_config(&config));
        let node = Arc::new(NodeRpcClient::from_config(&config));
        Self::with_clients(config, indexer, node, SiteResolution::default())
    }

    /// Wire against arbitrary indexer and node implementations.
    pub fn with_clients(
        config: ChainConfig,
        indexer: Arc<dyn IndexerClient>,
        node: Arc<dyn NodeClient>,
        resolution: SiteResolution,
    ) -> Self {
        let scanner = Arc::new(LedgerScanner::new(indexer, config.page_size));
        let reconciler =
            Arc::new(EntityReconciler::new(scanner, &config).with_resolution(resolution));
        let gate = Arc::new(SubmissionGate::new(node));

        info!(resolution = ?resolution, "blog runtime wired");
        Self {
            config,
            reconciler,
            gate,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub async fn sites(&self, type_args: &[u8]) -> Result<Vec<SiteRecord>> {
        Ok(self.reconciler.list_sites(type_args).await?)
    }

    pub async fn site(&self, id: &RecordId) -> Result<Option<SiteRecord>> {
        Ok(self.reconciler.get_site(id).await?)
    }

    /// Posts of a site, optionally only those owned by an Ethereum address.
    pub async fn posts(&self, site: &RecordId, owner: Option<&str>) -> Result<Vec<Post>> {
        let owner_lock = owner
            .map(|address| {
                parse_eth_address(address).map(|a| eth_owner_lock(&self.config.omnilock, &a))
            })
            .transpose()?;
        Ok(self.reconciler.list_posts(site, owner_lock).await?)
    }

    pub async fn post(&self, id: &RecordId) -> Result<Option<Post>> {
        Ok(self.reconciler.get_post(id).await?)
    }

    /// Spendable balance of an Ethereum address through Omnilock.
    pub async fn balance(&self, address: &str) -> Result<Balance> {
        let address = parse_eth_address(address)?;
        let lock = eth_owner_lock(&self.config.omnilock, &address);
        Ok(self.reconciler.get_capacity(lock).await?)
    }

    /// Sign a skeleton with `wallet`; nothing is submitted.
    ///
    /// Skeletons spending several inputs under one Omnilock lock are refused
    /// before the wallet is asked for anything.
    pub async fn sign(
        &self,
        skeleton: &TransactionSkeleton,
        wallet: Arc<dyn MessageSigner>,
    ) -> Result<Transaction> {
        ensure_single_input_groups(skeleton, &self.config.omnilock)
            .context("Transaction cannot be signed")?;

        let mut prepared = skeleton.clone();
        fill_placeholder_witnesses(&mut prepared, &self.config.omnilock);

        let signer = TransactionSigner::from_config(wallet, &self.config);
        signer
            .sign(&prepared)
            .await
            .context("Failed to sign transaction")
    }

    pub async fn submit(&self, tx: &Transaction) -> Result<Hash> {
        self.gate
            .submit(tx)
            .await
            .context("Failed to submit transaction")
    }

    /// Sign then submit.
    pub async fn sign_and_send(
        &self,
        skeleton: &TransactionSkeleton,
        wallet: Arc<dyn MessageSigner>,
    ) -> Result<Hash> {
        let tx = self.sign(skeleton, wallet).await?;
        self.submit(&tx).await
    }
}
