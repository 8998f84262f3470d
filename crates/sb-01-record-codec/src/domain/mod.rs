//! # Domain Layer
//!
//! Record types and the pure molecule codec.

pub mod codec;
pub mod entities;
pub mod errors;
