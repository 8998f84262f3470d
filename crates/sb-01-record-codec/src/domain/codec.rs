//! # Record Codec
//!
//! Molecule decode/encode for Cluster and Spore cell data.

use shared_types::molecule::{
    pack_bytes, pack_bytes_opt, pack_table, unpack_bytes, unpack_bytes_opt, unpack_table,
};
use shared_types::Cell;

use super::entities::{ClusterData, PostPayload, PostRecord, RecordId, SiteRecord, SporeData};
use super::errors::CodecError;

fn utf8_field(raw: &[u8], field: &str) -> Result<String, CodecError> {
    let bytes = unpack_bytes(raw)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| CodecError::MalformedRecord(format!("{field} is not valid UTF-8")))
}

/// Decode `ClusterData` cell data.
pub fn decode_site(data: &[u8]) -> Result<ClusterData, CodecError> {
    let fields = unpack_table(data, 2)?;
    Ok(ClusterData {
        name: utf8_field(fields[0], "name")?,
        description: utf8_field(fields[1], "description")?,
    })
}

/// Decode `SporeData` cell data.
pub fn decode_post(data: &[u8]) -> Result<SporeData, CodecError> {
    let fields = unpack_table(data, 3)?;
    Ok(SporeData {
        content_type: utf8_field(fields[0], "content_type")?,
        content: unpack_bytes(fields[1])?.to_vec(),
        cluster_id: unpack_bytes_opt(fields[2])?.map(|id| RecordId(id.to_vec())),
    })
}

/// Encode `ClusterData` cell data.
pub fn encode_site(site: &ClusterData) -> Vec<u8> {
    pack_table(&[
        pack_bytes(site.name.as_bytes()),
        pack_bytes(site.description.as_bytes()),
    ])
}

/// Encode `SporeData` cell data.
pub fn encode_post(post: &SporeData) -> Vec<u8> {
    pack_table(&[
        pack_bytes(post.content_type.as_bytes()),
        pack_bytes(&post.content),
        pack_bytes_opt(post.cluster_id.as_ref().map(RecordId::as_bytes)),
    ])
}

fn record_id(cell: &Cell) -> Result<RecordId, CodecError> {
    cell.output
        .type_
        .as_ref()
        .map(|script| RecordId(script.args.clone()))
        .ok_or_else(|| CodecError::MalformedRecord("cell has no type script".into()))
}

/// Build a site from a Cluster cell.
pub fn site_from_cell(cell: &Cell) -> Result<SiteRecord, CodecError> {
    let id = record_id(cell)?;
    let data = decode_site(&cell.data)?;
    Ok(SiteRecord {
        id,
        name: data.name,
        description: data.description,
    })
}

/// Build a post record from a Spore cell.
pub fn post_from_cell(cell: &Cell) -> Result<PostRecord, CodecError> {
    let id = record_id(cell)?;
    let data = decode_post(&cell.data)?;
    Ok(PostRecord {
        id,
        content_type: data.content_type,
        cluster_id: data.cluster_id,
        content: data.content,
    })
}

/// Extract `{ title, content }` from a JSON post body.
///
/// Returns `None` for invalid JSON, non-object payloads, and missing,
/// non-string or empty `title`/`content` fields.
pub fn parse_post_payload(content: &[u8]) -> Option<PostPayload> {
    let value: serde_json::Value = serde_json::from_slice(content).ok()?;
    let title = value.get("title")?.as_str()?;
    let body = value.get("content")?.as_str()?;
    if title.is_empty() || body.is_empty() {
        return None;
    }
    Some(PostPayload {
        title: title.to_string(),
        content: body.to_string(),
    })
}
