//! JSON-RPC client for the CKB node (`send_transaction`).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use shared_types::hex_serde;
use shared_types::{ChainConfig, Hash, JsonRpcRequest, JsonRpcResponse, Transaction};
use tracing::debug;

use crate::domain::{NodeError, OutputsValidator};
use crate::ports::outbound::NodeClient;

pub struct NodeRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl NodeRpcClient {
    pub fn new(rpc_url: impl Into<String>, timeout_secs: u64) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &ChainConfig) -> Self {
        Self::new(config.node_url.clone(), config.rpc_timeout_secs)
    }
}

fn parse_tx_hash(response: JsonRpcResponse<String>) -> Result<Hash, NodeError> {
    if let Some(error) = response.error {
        return Err(NodeError::Rpc(error));
    }
    let hash = response
        .result
        .ok_or_else(|| NodeError::Decode("response missing result".to_string()))?;
    hex_serde::decode_hash(&hash).map_err(NodeError::Decode)
}

#[async_trait]
impl NodeClient for NodeRpcClient {
    async fn send_transaction(
        &self,
        tx: &Transaction,
        outputs_validator: OutputsValidator,
    ) -> Result<Hash, NodeError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::new("send_transaction", (tx, outputs_validator), id);

        debug!(id, %outputs_validator, "node send_transaction");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| NodeError::Transport(e.to_string()))?;

        let rpc_response: JsonRpcResponse<String> = response
            .json()
            .await
            .map_err(|e| NodeError::Decode(e.to_string()))?;

        parse_tx_hash(rpc_response)
    }
}
