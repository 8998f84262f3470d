//! # Record Codec Adapter (SB-01)
//!
//! Decodes raw cell payloads into typed blog records.
//!
//! ## Record Layouts
//!
//! ```text
//! ClusterData = table { name: Bytes, description: Bytes }
//! SporeData   = table { content_type: Bytes, content: Bytes, cluster_id: BytesOpt }
//! ```
//!
//! A site is a Cluster cell, a post is a Spore cell whose content type is
//! `application/json` and whose JSON payload has non-empty `title` and
//! `content`. Record ids are the type-script args of the backing cell and stay
//! constant when the cell is replaced.
//!
//! The codec is pure: no I/O, no logging.

pub mod domain;

pub use domain::codec::{
    decode_post, decode_site, encode_post, encode_site, parse_post_payload, post_from_cell,
    site_from_cell,
};
pub use domain::entities::{
    ClusterData, PostPayload, PostRecord, RecordId, SiteRecord, SporeData, JSON_CONTENT_TYPE,
};
pub use domain::errors::CodecError;
