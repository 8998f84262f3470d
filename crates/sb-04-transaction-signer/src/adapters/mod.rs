//! # Adapters Layer

pub mod local;
