//! Omnilock ownership for Ethereum-style wallets.
//!
//! An Omnilock in Ethereum mode carries `flag(0x01) ‖ address(20) ‖ omni_flags(0x00)`.

use shared_types::{hex_serde, ScriptInfo, Script};

use super::errors::ReconcileError;

const ETHEREUM_AUTH_FLAG: u8 = 0x01;
const NO_OMNI_FLAGS: u8 = 0x00;

/// Parse a `0x`-prefixed 20-byte address.
pub fn parse_eth_address(address: &str) -> Result<[u8; 20], ReconcileError> {
    if !address.starts_with("0x") {
        return Err(ReconcileError::InvalidAddress(address.to_string()));
    }
    let bytes = hex_serde::decode_prefixed(address)
        .map_err(|e| ReconcileError::InvalidAddress(format!("{address}: {e}")))?;
    <[u8; 20]>::try_from(bytes.as_slice())
        .map_err(|_| ReconcileError::InvalidAddress(format!("{address}: expected 20 bytes")))
}

/// Omnilock args for an Ethereum address.
pub fn omnilock_args(address: &[u8; 20]) -> Vec<u8> {
    let mut args = Vec::with_capacity(22);
    args.push(ETHEREUM_AUTH_FLAG);
    args.extend_from_slice(address);
    args.push(NO_OMNI_FLAGS);
    args
}

/// Lock script owned by an Ethereum address.
pub fn eth_owner_lock(omnilock: &ScriptInfo, address: &[u8; 20]) -> Script {
    omnilock.script(omnilock_args(address))
}
