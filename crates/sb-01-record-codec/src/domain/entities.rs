//! # Domain Entities
//!
//! Raw molecule records and the decoded blog records built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_types::hex_serde;

use super::errors::CodecError;

/// Content type that marks a spore as a blog post.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Identifier of a site or post: the type-script args of its cell.
///
/// Displays and parses as `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RecordId(pub Vec<u8>);

impl RecordId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for RecordId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_serde::encode_prefixed(&self.0))
    }
}

impl FromStr for RecordId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_serde::decode_prefixed(s)
            .map(Self)
            .map_err(|e| CodecError::MalformedRecord(format!("invalid record id {s:?}: {e}")))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Decoded `ClusterData` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterData {
    pub name: String,
    pub description: String,
}

/// Decoded `SporeData` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SporeData {
    pub content_type: String,
    pub content: Vec<u8>,
    pub cluster_id: Option<RecordId>,
}

/// A blog site backed by a Cluster cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: RecordId,
    pub name: String,
    pub description: String,
}

/// A spore record, not yet checked for blog-post validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: RecordId,
    pub content_type: String,
    pub cluster_id: Option<RecordId>,
    pub content: Vec<u8>,
}

impl PostRecord {
    pub fn is_json(&self) -> bool {
        self.content_type == JSON_CONTENT_TYPE
    }

    /// A record without a cluster never belongs to a site.
    pub fn belongs_to(&self, site: &RecordId) -> bool {
        self.cluster_id.as_ref() == Some(site)
    }
}

/// The JSON body of a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
}
