//! # Molecule Packing
//!
//! Minimal implementation of the molecule serialization used by CKB:
//!
//! - `Bytes` / `fixvec`: `u32` item count (LE) followed by the items.
//! - `table` / `dynvec`: `u32` total size, one `u32` offset per field, then
//!   the field bodies. An empty table is the four bytes `04 00 00 00`.
//! - `option`: empty for `None`, the inner encoding for `Some`.
//!
//! Unpacking accepts tables with *more* fields than requested (molecule
//! compatible mode) and rejects tables with fewer.

use crate::errors::PackingError;

const NUMBER_SIZE: usize = 4;

/// Pack a byte string as `Bytes` (fixvec<byte>).
pub fn pack_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(NUMBER_SIZE + data.len());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out
}

/// Pack an optional byte string as `BytesOpt`.
pub fn pack_bytes_opt(data: Option<&[u8]>) -> Vec<u8> {
    data.map(pack_bytes).unwrap_or_default()
}

/// Pack a fixvec of fixed-size items.
pub fn pack_fixvec(items: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(items.len() as u32).to_le_bytes());
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

/// Pack a table (or dynvec; the layout is identical).
pub fn pack_table(fields: &[Vec<u8>]) -> Vec<u8> {
    let header_size = NUMBER_SIZE * (fields.len() + 1);
    let body_size: usize = fields.iter().map(Vec::len).sum();
    let total_size = header_size + body_size;

    let mut out = Vec::with_capacity(total_size);
    out.extend_from_slice(&(total_size as u32).to_le_bytes());
    let mut offset = header_size;
    for field in fields {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += field.len();
    }
    for field in fields {
        out.extend_from_slice(field);
    }
    out
}

/// Pack a dynvec of variable-size items.
pub fn pack_dynvec(items: &[Vec<u8>]) -> Vec<u8> {
    pack_table(items)
}

fn read_u32(data: &[u8], at: usize) -> Result<usize, PackingError> {
    let end = at + NUMBER_SIZE;
    let slice = data.get(at..end).ok_or(PackingError::Truncated {
        expected: end,
        actual: data.len(),
    })?;
    let mut buf = [0u8; NUMBER_SIZE];
    buf.copy_from_slice(slice);
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Split a table into its field slices, requiring at least `min_fields`.
pub fn unpack_table(data: &[u8], min_fields: usize) -> Result<Vec<&[u8]>, PackingError> {
    let total_size = read_u32(data, 0)?;
    if total_size != data.len() {
        return Err(PackingError::SizeMismatch {
            declared: total_size,
            actual: data.len(),
        });
    }

    if total_size == NUMBER_SIZE {
        if min_fields > 0 {
            return Err(PackingError::FieldCount {
                expected: min_fields,
                actual: 0,
            });
        }
        return Ok(Vec::new());
    }

    let first_offset = read_u32(data, NUMBER_SIZE)?;
    if first_offset % NUMBER_SIZE != 0 || first_offset < NUMBER_SIZE * 2 {
        return Err(PackingError::InvalidOffsets(format!(
            "first offset {first_offset} is not a valid header size"
        )));
    }
    if first_offset > total_size {
        return Err(PackingError::InvalidOffsets(format!(
            "header size {first_offset} exceeds total {total_size}"
        )));
    }

    let field_count = first_offset / NUMBER_SIZE - 1;
    if field_count < min_fields {
        return Err(PackingError::FieldCount {
            expected: min_fields,
            actual: field_count,
        });
    }

    let mut offsets = Vec::with_capacity(field_count + 1);
    for i in 0..field_count {
        offsets.push(read_u32(data, NUMBER_SIZE * (i + 1))?);
    }
    offsets.push(total_size);

    let mut fields = Vec::with_capacity(field_count);
    for window in offsets.windows(2) {
        let (start, end) = (window[0], window[1]);
        if start > end || end > total_size {
            return Err(PackingError::InvalidOffsets(format!(
                "field range {start}..{end} outside 0..{total_size}"
            )));
        }
        fields.push(&data[start..end]);
    }
    Ok(fields)
}

/// Unpack a `Bytes` value; the buffer must hold exactly one value.
pub fn unpack_bytes(data: &[u8]) -> Result<&[u8], PackingError> {
    let len = read_u32(data, 0)?;
    let expected = NUMBER_SIZE + len;
    if data.len() != expected {
        return Err(PackingError::SizeMismatch {
            declared: expected,
            actual: data.len(),
        });
    }
    Ok(&data[NUMBER_SIZE..])
}

/// Unpack a `BytesOpt` value.
pub fn unpack_bytes_opt(data: &[u8]) -> Result<Option<&[u8]>, PackingError> {
    if data.is_empty() {
        return Ok(None);
    }
    unpack_bytes(data).map(Some)
}
