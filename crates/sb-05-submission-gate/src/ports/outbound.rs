//! # Outbound Port

use async_trait::async_trait;
use shared_types::{Hash, Transaction};

use crate::domain::{NodeError, OutputsValidator};

/// CKB node transaction pool entry point.
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn send_transaction(
        &self,
        tx: &Transaction,
        outputs_validator: OutputsValidator,
    ) -> Result<Hash, NodeError>;
}
