//! # Inbound Port

use async_trait::async_trait;
use shared_types::{Hash, Transaction};

use crate::domain::SubmissionError;

#[async_trait]
pub trait SubmissionGateApi: Send + Sync {
    /// Hand a signed transaction to the node; returns its hash on acceptance.
    async fn submit(&self, tx: &Transaction) -> Result<Hash, SubmissionError>;
}
