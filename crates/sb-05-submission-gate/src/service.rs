//! # Submission Gate Service

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{hex_serde, Hash, Transaction};
use tracing::{info, warn};

use crate::domain::{OutputsValidator, SubmissionError};
use crate::ports::inbound::SubmissionGateApi;
use crate::ports::outbound::NodeClient;

/// Forwards signed transactions to the node, once, with `passthrough` output
/// validation.
pub struct SubmissionGate {
    node: Arc<dyn NodeClient>,
}

impl SubmissionGate {
    pub fn new(node: Arc<dyn NodeClient>) -> Self {
        Self { node }
    }

    pub fn outputs_validator(&self) -> OutputsValidator {
        OutputsValidator::Passthrough
    }
}

#[async_trait]
impl SubmissionGateApi for SubmissionGate {
    async fn submit(&self, tx: &Transaction) -> Result<Hash, SubmissionError> {
        let local_hash = tx.hash();
        let result = self
            .node
            .send_transaction(tx, self.outputs_validator())
            .await
            .map_err(SubmissionError::from);

        match &result {
            Ok(hash) => {
                if *hash != local_hash {
                    warn!(
                        node = %hex_serde::encode_prefixed(hash),
                        local = %hex_serde::encode_prefixed(&local_hash),
                        "node reported a different transaction hash"
                    );
                }
                info!(tx_hash = %hex_serde::encode_prefixed(hash), "transaction accepted");
            }
            Err(e) => {
                warn!(tx_hash = %hex_serde::encode_prefixed(&local_hash), error = %e, "submission failed");
            }
        }
        result
    }
}
