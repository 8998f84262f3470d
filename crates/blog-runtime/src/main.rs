//! # blog-cli
//!
//! Command-line front end for the Spore-Blog ledger core.
//!
//! ```text
//! blog-cli sites <site-id>
//! blog-cli posts <site-id> [--owner <eth-address>]
//! blog-cli post <spore-id>
//! blog-cli balance <eth-address>
//! blog-cli sign-and-send <skeleton.json> [--dry-run]
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr and honour
//! `RUST_LOG`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use blog_runtime::{load_config, BlogRuntime};
use sb_01_record_codec::RecordId;
use sb_04_transaction_signer::{LocalEthSigner, TransactionSkeleton};
use shared_types::hex_serde;

/// Environment variable holding the hex private key used by `sign-and-send`.
const PRIVATE_KEY_ENV: &str = "SB_PRIVATE_KEY";

/// Spore-Blog ledger client
#[derive(Parser, Debug)]
#[command(name = "blog-cli")]
#[command(about = "Read and publish blog records stored as Spore cells on CKB")]
struct Args {
    /// JSON chain configuration file (defaults to CKB testnet)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a site (cluster) and every stored version collapsed to one record
    Sites {
        /// Site id prefix (`0x` lists every site)
        site_id: String,
    },
    /// List the blog posts of a site
    Posts {
        site_id: String,
        /// Only posts owned by this Ethereum address
        #[arg(long)]
        owner: Option<String>,
    },
    /// Show one post
    Post { spore_id: String },
    /// Spendable CKB of an Ethereum address through Omnilock
    Balance { address: String },
    /// Sign a transaction skeleton with SB_PRIVATE_KEY and submit it
    SignAndSend {
        skeleton: PathBuf,
        /// Print the signed transaction instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Serialize)]
struct BalanceOutput {
    address: String,
    shannons: u64,
    ckb: String,
    cells: usize,
}

#[derive(Serialize)]
struct SubmitOutput {
    tx_hash: String,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to encode output")?
    );
    Ok(())
}

fn parse_id(raw: &str) -> Result<RecordId> {
    raw.parse()
        .with_context(|| format!("Invalid record id {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(args.config.as_deref())?;
    let runtime = BlogRuntime::new(config);

    match args.command {
        Command::Sites { site_id } => {
            let prefix = parse_id(&site_id)?;
            print_json(&runtime.sites(prefix.as_bytes()).await?)?;
        }
        Command::Posts { site_id, owner } => {
            let site = parse_id(&site_id)?;
            print_json(&runtime.posts(&site, owner.as_deref()).await?)?;
        }
        Command::Post { spore_id } => {
            let id = parse_id(&spore_id)?;
            print_json(&runtime.post(&id).await?)?;
        }
        Command::Balance { address } => {
            let balance = runtime.balance(&address).await?;
            print_json(&BalanceOutput {
                address,
                shannons: balance.shannons,
                ckb: balance.to_string(),
                cells: balance.cells,
            })?;
        }
        Command::SignAndSend { skeleton, dry_run } => {
            let raw = std::fs::read_to_string(&skeleton)
                .with_context(|| format!("Failed to read {}", skeleton.display()))?;
            let skeleton: TransactionSkeleton =
                serde_json::from_str(&raw).context("Failed to parse transaction skeleton")?;

            let key = std::env::var(PRIVATE_KEY_ENV)
                .with_context(|| format!("{PRIVATE_KEY_ENV} is not set"))?;
            let wallet = Arc::new(LocalEthSigner::from_hex(&key).context("Invalid private key")?);

            if dry_run {
                print_json(&runtime.sign(&skeleton, wallet).await?)?;
            } else {
                let hash = runtime.sign_and_send(&skeleton, wallet).await?;
                print_json(&SubmitOutput {
                    tx_hash: hex_serde::encode_prefixed(&hash),
                })?;
            }
        }
    }

    Ok(())
}
