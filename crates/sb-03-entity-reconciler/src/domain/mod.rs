//! # Domain Layer
//!
//! Blog entities and the pure rules that build them from cells.

pub mod entities;
pub mod errors;
pub mod ownership;
pub mod reconcile;

pub use entities::{Balance, Post, SiteResolution};
pub use errors::ReconcileError;
pub use ownership::{eth_owner_lock, omnilock_args, parse_eth_address};
pub use reconcile::{blog_post, is_plain_cell, SiteResolver};
