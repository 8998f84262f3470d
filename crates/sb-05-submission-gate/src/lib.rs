//! # Submission Gate (SB-05)
//!
//! Single exit point for signed transactions.
//!
//! - Node rejection (dead input, script failure, fee too low) becomes
//!   `SubmissionRejected` carrying the node's message verbatim.
//! - Transport failure becomes `NodeUnavailable`.
//! - No retries: a rejected transaction is final, and a resubmission after a
//!   transport failure is the caller's decision.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::rpc::NodeRpcClient;
pub use domain::{NodeError, OutputsValidator, SubmissionError};
pub use ports::inbound::SubmissionGateApi;
pub use ports::outbound::NodeClient;
pub use service::SubmissionGate;
