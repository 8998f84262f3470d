//! # Entity Reconciler (SB-03)
//!
//! Rebuilds blog sites and posts from the live cells of the Cluster and Spore
//! scripts, and sums wallet balances from plain cells.
//!
//! ## Listing Rules
//!
//! | Operation | Scan | Rule |
//! |-----------|------|------|
//! | `list_sites` | Cluster, args prefix | one record per id, chosen by [`SiteResolution`] |
//! | `list_posts` | Spore, optional owner | content type, then cluster id, then payload |
//! | `get_site` | Cluster, exact args | as `list_sites` |
//! | `get_post` | Spore, exact args | first valid blog post |
//! | `get_capacity` | owner lock, empty type and data | sum of capacities |
//!
//! Records that fail a filter are dropped without error. Cells that do not
//! decode are logged at `warn` and skipped. A scan failure aborts the whole
//! call with `ReconcileError::Scan`.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    eth_owner_lock, omnilock_args, parse_eth_address, Balance, Post, ReconcileError,
    SiteResolution,
};
pub use ports::inbound::EntityReconcilerApi;
pub use service::EntityReconciler;
