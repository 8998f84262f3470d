//! # Ledger Scanner Service
//!
//! Drives cursor pagination against an [`IndexerClient`] and flattens the
//! pages into a [`CellStream`].

use std::collections::VecDeque;
use std::sync::Arc;

use futures::stream::{self, TryStreamExt};
use shared_types::Cell;
use tracing::{debug, warn};

use crate::domain::entities::{CellSelector, SearchKey};
use crate::domain::errors::ScanError;
use crate::ports::inbound::{CellStream, LedgerScannerApi};
use crate::ports::outbound::IndexerClient;

/// Scanner over any indexer implementation.
pub struct LedgerScanner {
    indexer: Arc<dyn IndexerClient>,
    page_size: u32,
}

impl LedgerScanner {
    pub fn new(indexer: Arc<dyn IndexerClient>, page_size: u32) -> Self {
        Self {
            indexer,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

struct ScanState {
    indexer: Arc<dyn IndexerClient>,
    search_key: SearchKey,
    page_size: u32,
    cursor: Option<String>,
    buffer: VecDeque<Cell>,
    pages: u32,
    exhausted: bool,
}

impl LedgerScannerApi for LedgerScanner {
    fn scan(&self, selector: CellSelector) -> CellStream {
        let search_key = match selector.to_search_key() {
            Ok(key) => key,
            Err(e) => return Box::pin(stream::once(async move { Err(e) })),
        };

        let initial_state = ScanState {
            indexer: Arc::clone(&self.indexer),
            search_key,
            page_size: self.page_size,
            cursor: None,
            buffer: VecDeque::new(),
            pages: 0,
            exhausted: false,
        };

        Box::pin(stream::unfold(initial_state, |mut state| async move {
            loop {
                if let Some(cell) = state.buffer.pop_front() {
                    return Some((Ok(cell), state));
                }
                if state.exhausted {
                    return None;
                }

                let page = match state
                    .indexer
                    .get_cells(&state.search_key, state.page_size, state.cursor.as_deref())
                    .await
                {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(error = %e, pages = state.pages, "scan aborted");
                        state.exhausted = true;
                        state.buffer.clear();
                        return Some((Err(ScanError::from(e)), state));
                    }
                };

                state.pages += 1;
                let fetched = page.cells.len();
                debug!(page = state.pages, fetched, "indexer page");

                let short_page = fetched < state.page_size as usize;
                let stalled = page.last_cursor.is_none() || page.last_cursor == state.cursor;
                if short_page || stalled {
                    state.exhausted = true;
                }
                state.cursor = page.last_cursor;
                state.buffer.extend(page.cells);
            }
        }))
    }
}

/// Collect a stream to completion, failing on the first error.
pub async fn drain(stream: CellStream) -> Result<Vec<Cell>, ScanError> {
    stream.try_collect().await
}
