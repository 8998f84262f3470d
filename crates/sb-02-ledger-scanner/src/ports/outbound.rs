//! # Outbound Port

use async_trait::async_trait;

use crate::domain::entities::{CellsPage, SearchKey};
use crate::domain::errors::IndexerError;

/// Cell indexer, paged by cursor in ascending order.
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Fetch up to `limit` cells after `cursor` (`None` = first page).
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<CellsPage, IndexerError>;
}
