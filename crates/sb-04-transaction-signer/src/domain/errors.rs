//! # Signer Errors

use thiserror::Error;

/// Errors from a signing pass. No partial witness set survives any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// The external wallet refused or failed to sign.
    #[error("Signing rejected: {0}")]
    SigningRejected(String),

    /// An input that needs a signature has no witness slot.
    #[error("Missing witness for input {index}")]
    MissingWitness { index: usize },

    /// The wallet returned something that is not a 65-byte signature.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// An existing witness slot is not a valid `WitnessArgs`.
    #[error("Malformed witness at {index}: {reason}")]
    MalformedWitness { index: usize, reason: String },

    /// Two inputs share one Omnilock lock. The lock script hashes the later
    /// slots of a group as submitted, so a sealed group of several inputs
    /// never verifies.
    #[error("Inputs {first} and {second} share one Omnilock lock")]
    SharedLockGroup { first: usize, second: usize },
}

/// Failure reported by a [`MessageSigner`](crate::ports::outbound::MessageSigner).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("user rejected the request")]
    Rejected,

    #[error("wallet unavailable: {0}")]
    Unavailable(String),

    #[error("key error: {0}")]
    Key(String),
}

impl From<WalletError> for SignerError {
    fn from(err: WalletError) -> Self {
        SignerError::SigningRejected(err.to_string())
    }
}
