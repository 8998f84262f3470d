//! # Submission Errors

use shared_types::JsonRpcError;
use thiserror::Error;

/// Submission outcome errors. Neither is retried by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The node refused the transaction; `reason` is its message verbatim.
    #[error("Submission rejected: {reason}")]
    SubmissionRejected { reason: String },

    /// The node could not be reached or answered garbage.
    #[error("Node unavailable: {0}")]
    NodeUnavailable(String),
}

/// Errors from the node port.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error: {0}")]
    Rpc(JsonRpcError),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<NodeError> for SubmissionError {
    fn from(err: NodeError) -> Self {
        match err {
            NodeError::Rpc(error) => SubmissionError::SubmissionRejected {
                reason: error.to_string(),
            },
            other => SubmissionError::NodeUnavailable(other.to_string()),
        }
    }
}
