//! # Hex Serde Helpers
//!
//! CKB JSON-RPC encodes byte strings as `0x`-prefixed hex and integers as
//! `0x`-prefixed hex quantities. These modules plug into `#[serde(with)]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_prefixed(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode hex with or without a `0x` prefix.
pub fn decode_prefixed(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

/// Decode a 32-byte hash from hex.
pub fn decode_hash(s: &str) -> Result<[u8; 32], String> {
    let bytes = decode_prefixed(s).map_err(|e| e.to_string())?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| format!("expected 32 bytes, got {}", bytes.len()))
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(s: &str) -> Result<u64, String> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| format!("quantity {s:?} lacks 0x prefix"))?;
    u64::from_str_radix(digits, 16).map_err(|e| e.to_string())
}

/// `Vec<u8>` as hex.
pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_prefixed(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_prefixed(&s).map_err(D::Error::custom)
    }
}

/// `Vec<Vec<u8>>` as an array of hex strings.
pub mod bytes_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(value: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&encode_prefixed(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .iter()
            .map(|s| decode_prefixed(s).map_err(D::Error::custom))
            .collect()
    }
}

/// `[u8; 32]` as hex.
pub mod hash {
    use super::*;

    pub fn serialize<S: Serializer>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_prefixed(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hash(&s).map_err(D::Error::custom)
    }
}

/// `Vec<[u8; 32]>` as an array of hex strings.
pub mod hash_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(value: &[[u8; 32]], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&encode_prefixed(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<[u8; 32]>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .iter()
            .map(|s| decode_hash(s).map_err(D::Error::custom))
            .collect()
    }
}

/// `u64` as a hex quantity.
pub mod uint64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_quantity(&s).map_err(D::Error::custom)
    }
}

/// `Vec<u64>` as an array of hex quantities.
pub mod uint64_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(value: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(value.len()))?;
        for item in value {
            seq.serialize_element(&format!("{item:#x}"))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .iter()
            .map(|s| parse_quantity(s).map_err(D::Error::custom))
            .collect()
    }
}

/// `u32` as a hex quantity.
pub mod uint32 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        let value = parse_quantity(&s).map_err(D::Error::custom)?;
        u32::try_from(value).map_err(D::Error::custom)
    }
}
