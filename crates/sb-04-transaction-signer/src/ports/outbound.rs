//! # Outbound Port

use async_trait::async_trait;

use crate::domain::WalletError;

/// An external Ethereum-style wallet.
#[async_trait]
pub trait MessageSigner: Send + Sync {
    /// `personal_sign` over the raw message bytes.
    ///
    /// Returns `r ‖ s ‖ v`; `v` may be 0/1 or 27/28.
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError>;
}
