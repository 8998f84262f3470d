//! # Spore-Blog Test Suite
//!
//! Cross-crate flows run against an in-memory chain.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── mock_chain.rs   # indexer + node over one live-cell set
//!     └── flows.rs        # read path, publish path, rejections
//! benches/
//! └── core_benchmarks.rs  # codec, signing-entry and signing throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sb-tests
//! cargo test -p sb-tests integration::flows::
//! cargo bench -p sb-tests
//! ```

pub mod integration;
