//! # End-to-End Flows
//!
//! ## Test Categories
//!
//! 1. **Read path**: sites, posts and balance reconciled over paginated scans
//! 2. **Publish path**: skeleton → signature → node → visible to the next read
//! 3. **Rejections**: spent inputs, foreign signatures and shared lock groups
//!    leave the chain as it was

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use blog_runtime::BlogRuntime;
use k256::ecdsa::SigningKey;
use sb_01_record_codec::{
    encode_post, encode_site, ClusterData, RecordId, SporeData, JSON_CONTENT_TYPE,
};
use sb_03_entity_reconciler::{eth_owner_lock, SiteResolution};
use sb_04_transaction_signer::{
    LocalEthSigner, MessageSigner, SignerError, TransactionSkeleton, WalletError, OMNILOCK_LOCK_LEN,
};
use sb_05_submission_gate::SubmissionError;
use shared_types::{Cell, CellOutput, ChainConfig, Script, WitnessArgs, SHANNONS_PER_CKB};

use super::mock_chain::MockChain;

// =============================================================================
// FIXTURES
// =============================================================================

const SITE: [u8; 32] = [0xaa; 32];
const OTHER_SITE: [u8; 32] = [0xbb; 32];

struct Harness {
    config: ChainConfig,
    chain: Arc<MockChain>,
    runtime: BlogRuntime,
    wallet: Arc<LocalEthSigner>,
}

impl Harness {
    fn new() -> Self {
        let config = ChainConfig {
            page_size: 2,
            ..ChainConfig::testnet()
        };
        let chain = Arc::new(MockChain::new(&config));
        let runtime = BlogRuntime::with_clients(
            config.clone(),
            chain.clone(),
            chain.clone(),
            SiteResolution::MostRecent,
        );
        let wallet = Arc::new(wallet(1));
        Self {
            config,
            chain,
            runtime,
            wallet,
        }
    }

    fn owner_lock(&self) -> Script {
        eth_owner_lock(&self.config.omnilock, &self.wallet.address())
    }

    fn address(&self) -> String {
        shared_types::hex_serde::encode_prefixed(&self.wallet.address())
    }

    fn mint_site(&self, id: [u8; 32], name: &str) -> Cell {
        self.chain.mint(
            CellOutput {
                capacity: 200 * SHANNONS_PER_CKB,
                lock: self.owner_lock(),
                type_: Some(self.config.cluster.script(id.to_vec())),
            },
            encode_site(&ClusterData {
                name: name.into(),
                description: format!("{name} description"),
            }),
        )
    }

    fn post_output(&self, id: [u8; 32], site: [u8; 32], title: &str) -> (CellOutput, Vec<u8>) {
        let payload = format!(r#"{{"title":"{title}","content":"body of {title}"}}"#);
        (
            CellOutput {
                capacity: 300 * SHANNONS_PER_CKB,
                lock: self.owner_lock(),
                type_: Some(self.config.spore.script(id.to_vec())),
            },
            encode_post(&SporeData {
                content_type: JSON_CONTENT_TYPE.into(),
                content: payload.into_bytes(),
                cluster_id: Some(RecordId(site.to_vec())),
            }),
        )
    }

    fn mint_post(&self, id: [u8; 32], site: [u8; 32], title: &str) -> Cell {
        let (output, data) = self.post_output(id, site, title);
        self.chain.mint(output, data)
    }

    fn mint_capacity(&self, ckb: u64) -> Cell {
        self.chain.mint(
            CellOutput {
                capacity: ckb * SHANNONS_PER_CKB,
                lock: self.owner_lock(),
                type_: None,
            },
            Vec::new(),
        )
    }

    /// Spend `input` into `outputs`, returning the rest as a change cell.
    fn skeleton(&self, input: Cell, outputs: Vec<(CellOutput, Vec<u8>)>) -> TransactionSkeleton {
        let spent: u64 = outputs.iter().map(|(o, _)| o.capacity).sum();
        let fee = 1_000;
        let change = CellOutput {
            capacity: input.output.capacity - spent - fee,
            lock: self.owner_lock(),
            type_: None,
        };

        let (mut outs, mut data): (Vec<_>, Vec<_>) = outputs.into_iter().unzip();
        outs.push(change);
        data.push(Vec::new());

        TransactionSkeleton {
            cell_deps: vec![
                self.config.omnilock.cell_dep,
                self.config.spore.cell_dep,
                self.config.cluster.cell_dep,
            ],
            inputs: vec![input],
            outputs: outs,
            outputs_data: data,
            ..TransactionSkeleton::default()
        }
    }
}

/// Wallet that records how often it was asked to sign.
struct CountingWallet {
    inner: LocalEthSigner,
    calls: AtomicU32,
}

#[async_trait]
impl MessageSigner for CountingWallet {
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_message(message).await
    }
}

fn wallet(seed: u8) -> LocalEthSigner {
    let mut key = [0u8; 32];
    key[31] = seed;
    LocalEthSigner::new(SigningKey::from_slice(&key).unwrap())
}

fn site_id(bytes: [u8; 32]) -> RecordId {
    RecordId(bytes.to_vec())
}

mod tests {
    use super::*;

    // =========================================================================
    // READ PATH
    // =========================================================================

    #[tokio::test]
    async fn test_sites_collapse_versions_to_most_recent() -> Result<()> {
        let h = Harness::new();
        h.mint_site(SITE, "Draft");
        h.mint_site(OTHER_SITE, "Other");
        h.mint_site(SITE, "Published");

        let sites = h.runtime.sites(&SITE).await?;

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].id, site_id(SITE));
        assert_eq!(sites[0].name, "Published");

        let all = h.runtime.sites(&[]).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_posts_filtered_by_site_across_pages() -> Result<()> {
        let h = Harness::new();
        h.mint_site(SITE, "Blog");
        h.mint_post([1; 32], SITE, "first");
        h.mint_post([2; 32], OTHER_SITE, "elsewhere");
        h.mint_post([3; 32], SITE, "second");
        h.mint_post([4; 32], SITE, "third");

        let posts = h.runtime.posts(&site_id(SITE), None).await?;

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
        // 4 spores at page size 2: two full pages and one empty page
        assert_eq!(h.chain.indexer_calls.load(Ordering::SeqCst), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_posts_restricted_to_owner() -> Result<()> {
        let h = Harness::new();
        h.mint_post([1; 32], SITE, "mine");
        let stranger = wallet(2);
        let stranger_address = shared_types::hex_serde::encode_prefixed(&stranger.address());

        let mine = h.runtime.posts(&site_id(SITE), Some(&h.address())).await?;
        let theirs = h
            .runtime
            .posts(&site_id(SITE), Some(&stranger_address))
            .await?;

        assert_eq!(mine.len(), 1);
        assert!(theirs.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_balance_counts_plain_cells_only() -> Result<()> {
        let h = Harness::new();
        h.mint_capacity(100);
        h.mint_capacity(61);
        h.mint_site(SITE, "Blog");
        h.mint_post([1; 32], SITE, "post");

        let balance = h.runtime.balance(&h.address()).await?;

        assert_eq!(balance.shannons, 161 * SHANNONS_PER_CKB);
        assert_eq!(balance.cells, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_owner_address_rejected_before_scanning() {
        let h = Harness::new();

        assert!(h.runtime.balance("0x1234").await.is_err());
        assert_eq!(h.chain.indexer_calls.load(Ordering::SeqCst), 0);
    }

    // =========================================================================
    // PUBLISH PATH
    // =========================================================================

    #[tokio::test]
    async fn test_publish_post_then_read_it_back() -> Result<()> {
        let h = Harness::new();
        h.mint_site(SITE, "Blog");
        let funding = h.mint_capacity(1_000);
        let skeleton = h.skeleton(funding.clone(), vec![h.post_output([7; 32], SITE, "hello")]);

        let tx_hash = h.runtime.sign_and_send(&skeleton, h.wallet.clone()).await?;

        assert_eq!(tx_hash, skeleton.tx_hash());
        assert!(!h.chain.is_live(&funding.out_point));

        let post = h
            .runtime
            .post(&RecordId(vec![7; 32]))
            .await?
            .expect("published post is live");
        assert_eq!(post.title, "hello");
        assert_eq!(post.content, "body of hello");
        assert_eq!(post.cluster_id, Some(site_id(SITE)));
        assert_eq!(post.out_point.tx_hash, tx_hash);

        let balance = h.runtime.balance(&h.address()).await?;
        assert_eq!(balance.shannons, 700 * SHANNONS_PER_CKB - 1_000);
        assert_eq!(balance.cells, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_site_update_supersedes_previous_version() -> Result<()> {
        let h = Harness::new();
        let original = h.mint_site(SITE, "Before");
        let mut output = original.output.clone();
        output.capacity -= 1_000;
        let skeleton = TransactionSkeleton {
            cell_deps: vec![h.config.omnilock.cell_dep, h.config.cluster.cell_dep],
            inputs: vec![original],
            outputs: vec![output],
            outputs_data: vec![encode_site(&ClusterData {
                name: "After".into(),
                description: "renamed".into(),
            })],
            ..TransactionSkeleton::default()
        };

        h.runtime.sign_and_send(&skeleton, h.wallet.clone()).await?;

        let site = h.runtime.site(&site_id(SITE)).await?.expect("site exists");
        assert_eq!(site.name, "After");
        assert_eq!(h.runtime.sites(&SITE).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_only_leaves_chain_untouched() -> Result<()> {
        let h = Harness::new();
        let funding = h.mint_capacity(500);
        let skeleton = h.skeleton(funding.clone(), vec![]);

        let tx = h.runtime.sign(&skeleton, h.wallet.clone()).await?;

        assert_eq!(h.chain.submissions.load(Ordering::SeqCst), 0);
        assert!(h.chain.is_live(&funding.out_point));
        assert!(skeleton.witnesses.is_empty());

        let lock = WitnessArgs::unpack(&tx.witnesses[0])?.lock.expect("lock set");
        assert_eq!(lock.len(), OMNILOCK_LOCK_LEN);
        assert_ne!(lock, vec![0u8; OMNILOCK_LOCK_LEN]);
        Ok(())
    }

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    #[tokio::test]
    async fn test_resubmitting_spent_input_rejected() -> Result<()> {
        let h = Harness::new();
        let funding = h.mint_capacity(1_000);
        let skeleton = h.skeleton(funding, vec![h.post_output([7; 32], SITE, "once")]);
        let tx = h.runtime.sign(&skeleton, h.wallet.clone()).await?;

        h.runtime.submit(&tx).await?;
        let live_after_first = h.chain.live_cells();
        let err = h.runtime.submit(&tx).await.unwrap_err();

        match err.downcast_ref::<SubmissionError>() {
            Some(SubmissionError::SubmissionRejected { reason }) => {
                assert!(reason.contains("Dead"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(h.chain.live_cells(), live_after_first);
        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_wallet_signature_rejected() -> Result<()> {
        let h = Harness::new();
        let funding = h.mint_capacity(1_000);
        let skeleton = h.skeleton(funding.clone(), vec![]);
        let stranger = Arc::new(wallet(2));

        let err = h
            .runtime
            .sign_and_send(&skeleton, stranger)
            .await
            .unwrap_err();

        match err.downcast_ref::<SubmissionError>() {
            Some(SubmissionError::SubmissionRejected { reason }) => {
                assert!(reason.contains("Inputs[0].Lock"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(h.chain.is_live(&funding.out_point));
        Ok(())
    }

    #[tokio::test]
    async fn test_shared_lock_group_refused_before_wallet() -> Result<()> {
        let h = Harness::new();
        let first = h.mint_capacity(600);
        let second = h.mint_capacity(600);
        let mut skeleton = h.skeleton(first.clone(), vec![]);
        skeleton.inputs.push(second.clone());
        skeleton.outputs[0].capacity += second.output.capacity;

        let counting = Arc::new(CountingWallet {
            inner: wallet(1),
            calls: AtomicU32::new(0),
        });
        let err = h
            .runtime
            .sign_and_send(&skeleton, counting.clone())
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SignerError>(),
            Some(&SignerError::SharedLockGroup { first: 0, second: 1 })
        );
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.chain.submissions.load(Ordering::SeqCst), 0);
        assert!(h.chain.is_live(&first.out_point));
        assert!(h.chain.is_live(&second.out_point));
        Ok(())
    }
}
