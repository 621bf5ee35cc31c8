//! Minimal RLP codec for cached account records.
//!
//! Encoding follows Ethereum's RLP rules for byte strings and a single
//! flat list; nested lists never occur in an account record. Decoding is
//! strict (canonical lengths, no trailing bytes) because the backend hands
//! back opaque bytes that must be treated as untrusted.

use super::CacheError;

// =============================================================================
// ENCODING
// =============================================================================

/// RLP-encode an unsigned integer as a minimal big-endian byte string.
pub fn encode_uint(out: &mut Vec<u8>, value: u128) {
    if value == 0 {
        out.push(0x80); // Empty string
    } else if value < 0x80 {
        out.push(value as u8);
    } else {
        let bytes = value.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(15);
        let len = 16 - start;
        out.push(0x80 + len as u8);
        out.extend_from_slice(&bytes[start..]);
    }
}

/// RLP-encode a byte slice.
pub fn encode_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < 0x80 {
        out.push(data[0]);
    } else if data.len() < 56 {
        out.push(0x80 + data.len() as u8);
        out.extend_from_slice(data);
    } else {
        let len_bytes = encode_length(data.len());
        out.push(0xb7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
        out.extend_from_slice(data);
    }
}

/// Wrap already-encoded items in an RLP list.
pub fn wrap_list(payload: Vec<u8>) -> Vec<u8> {
    let mut result = Vec::with_capacity(payload.len() + 9);
    if payload.len() < 56 {
        result.push(0xc0 + payload.len() as u8);
    } else {
        let len_bytes = encode_length(payload.len());
        result.push(0xf7 + len_bytes.len() as u8);
        result.extend_from_slice(&len_bytes);
    }
    result.extend(payload);
    result
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

// =============================================================================
// DECODING
// =============================================================================

fn malformed(msg: &str) -> CacheError {
    CacheError::MalformedElement(msg.to_string())
}

/// Decode a flat RLP list into its item payloads.
///
/// Rejects trailing bytes, truncated payloads, and nested lists.
pub fn decode_list(data: &[u8]) -> Result<Vec<&[u8]>, CacheError> {
    let (first, rest) = data.split_first().ok_or_else(|| malformed("empty input"))?;
    let payload = match *first {
        0xc0..=0xf7 => {
            let len = (*first - 0xc0) as usize;
            if rest.len() != len {
                return Err(malformed("list payload length mismatch"));
            }
            rest
        }
        0xf8..=0xff => {
            let len_len = (*first - 0xf7) as usize;
            if rest.len() < len_len {
                return Err(malformed("truncated list header"));
            }
            let len = decode_length(&rest[..len_len])?;
            if len < 56 {
                return Err(malformed("non-canonical long list"));
            }
            let payload = &rest[len_len..];
            if payload.len() != len {
                return Err(malformed("list payload length mismatch"));
            }
            payload
        }
        _ => return Err(malformed("not an rlp list")),
    };

    let mut items = Vec::with_capacity(4);
    let mut cursor = payload;
    while !cursor.is_empty() {
        let (item, rest) = decode_item(cursor)?;
        items.push(item);
        cursor = rest;
    }
    Ok(items)
}

/// Decode an unsigned integer item (minimal big-endian bytes).
pub fn decode_uint(item: &[u8]) -> Result<u128, CacheError> {
    if item.is_empty() {
        return Ok(0);
    }
    if item[0] == 0 {
        return Err(malformed("uint has leading zero"));
    }
    if item.len() > 16 {
        return Err(malformed("uint exceeds 128 bits"));
    }
    Ok(item.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128))
}

/// Split one byte-string item off the front of `data`.
fn decode_item(data: &[u8]) -> Result<(&[u8], &[u8]), CacheError> {
    let first = *data.first().ok_or_else(|| malformed("empty item"))?;
    match first {
        0x00..=0x7f => Ok((&data[..1], &data[1..])),
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            if data.len() < 1 + len {
                return Err(malformed("truncated short string"));
            }
            Ok((&data[1..1 + len], &data[1 + len..]))
        }
        0xb8..=0xbf => {
            let len_len = (first - 0xb7) as usize;
            if data.len() < 1 + len_len {
                return Err(malformed("truncated string header"));
            }
            let len = decode_length(&data[1..1 + len_len])?;
            if len < 56 {
                return Err(malformed("non-canonical long string"));
            }
            let start = 1 + len_len;
            if data.len() < start + len {
                return Err(malformed("truncated long string"));
            }
            Ok((&data[start..start + len], &data[start + len..]))
        }
        _ => Err(malformed("unexpected nested list")),
    }
}

/// Decode a canonical big-endian length field.
fn decode_length(bytes: &[u8]) -> Result<usize, CacheError> {
    if bytes.is_empty() || bytes[0] == 0 {
        return Err(malformed("non-canonical length"));
    }
    if bytes.len() > std::mem::size_of::<usize>() {
        return Err(malformed("length overflow"));
    }
    Ok(bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize))
}
