//! JSON-RPC client for the CKB indexer (`get_cells`).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shared_types::hex_serde;
use shared_types::{Cell, CellOutput, ChainConfig, JsonRpcRequest, JsonRpcResponse, OutPoint};
use tracing::debug;

use crate::domain::entities::{CellsPage, SearchKey};
use crate::domain::errors::IndexerError;
use crate::ports::outbound::IndexerClient;

/// Cell object as returned by `get_cells`.
#[derive(Debug, Deserialize)]
struct IndexerCell {
    output: CellOutput,
    #[serde(with = "hex_serde::bytes", default)]
    output_data: Vec<u8>,
    out_point: OutPoint,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    tx_index: Option<String>,
}

impl IndexerCell {
    fn into_cell(self) -> Result<Cell, IndexerError> {
        let block_number = self
            .block_number
            .as_deref()
            .map(hex_serde::parse_quantity)
            .transpose()
            .map_err(IndexerError::Decode)?;
        let tx_index = self
            .tx_index
            .as_deref()
            .map(hex_serde::parse_quantity)
            .transpose()
            .map_err(IndexerError::Decode)?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| IndexerError::Decode(format!("tx_index out of range: {e}")))?;

        Ok(Cell {
            out_point: self.out_point,
            output: self.output,
            data: self.output_data,
            block_number,
            tx_index,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IndexerPage {
    objects: Vec<IndexerCell>,
    #[serde(default)]
    last_cursor: Option<String>,
}

/// Indexer client over HTTP.
pub struct IndexerRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl IndexerRpcClient {
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
        Self::new(config.indexer_url.clone(), config.rpc_timeout_secs)
    }

    pub fn url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl IndexerClient for IndexerRpcClient {
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<CellsPage, IndexerError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let params = (search_key, "asc", format!("{limit:#x}"), cursor);
        let request = JsonRpcRequest::new("get_cells", params, id);

        debug!(id, limit, cursor = ?cursor, "indexer get_cells");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| IndexerError::Transport(e.to_string()))?;

        let rpc_response: JsonRpcResponse<IndexerPage> = response
            .json()
            .await
            .map_err(|e| IndexerError::Decode(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(IndexerError::Rpc(error));
        }

        let page = rpc_response
            .result
            .ok_or_else(|| IndexerError::Decode("response missing result".to_string()))?;

        let cells = page
            .objects
            .into_iter()
            .map(IndexerCell::into_cell)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CellsPage {
            cells,
            last_cursor: page.last_cursor,
        })
    }
}
