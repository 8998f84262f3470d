//! # Inbound Port

use async_trait::async_trait;
use shared_types::Transaction;

use crate::domain::{SignerError, TransactionSkeleton};

#[async_trait]
pub trait TransactionSignerApi: Send + Sync {
    /// Produce a fully witnessed transaction from `skeleton`.
    ///
    /// The skeleton is only read. On error nothing is returned, so there is
    /// never a partially signed transaction.
    async fn sign(&self, skeleton: &TransactionSkeleton) -> Result<Transaction, SignerError>;
}
