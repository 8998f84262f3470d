//! # Domain Layer
//!
//! Scan selectors and the indexer search key they translate into.

pub mod entities;
pub mod errors;
