//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps travel as their canonical RFC 3339 text)
//!
//! It is the wire codec for whole transactions and the container for the
//! (R, S) pair inside a signature string. Decoding re-encodes the parsed value
//! and rejects any input that is not byte-identical, so every value has
//! exactly one accepted encoding.

use ciborium::value::{Integer, Value};

use crate::error::CoreError;
use crate::transaction::{PostData, Transaction, TransactionHeader};
use crate::types::{Timestamp, TransactionType};

/// Transaction field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const TYPE: u64 = 0;
    pub const CREATED_AT: u64 = 1;
    pub const FROM: u64 = 2;
    pub const TO: u64 = 3;
    pub const CRITICIZED_HASH: u64 = 4;
    pub const POST_ID: u64 = 5;
    pub const PAYLOAD: u64 = 6;
    pub const POST_HASH: u64 = 7;
    pub const SIGNATURE: u64 = 8;
    pub const TRANSACTION_HASH: u64 = 9;
}

/// Encode a transaction to canonical CBOR bytes.
pub fn canonical_bytes(tx: &Transaction) -> Vec<u8> {
    let value = transaction_to_cbor_value(tx);
    encode_cbor_value_canonical(&value)
}

/// Decode a transaction from canonical CBOR bytes.
pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction, CoreError> {
    let value = decode_canonical(bytes)?;
    cbor_value_to_transaction(&value)
}

fn transaction_to_cbor_value(tx: &Transaction) -> Value {
    let h = &tx.header;
    Value::Map(vec![
        (key(keys::TYPE), Value::Integer(h.tx_type.to_i32().into())),
        (key(keys::CREATED_AT), Value::Text(h.created_at.canonical_string())),
        (key(keys::FROM), Value::Text(h.from.clone())),
        (key(keys::TO), Value::Text(h.to.clone())),
        (key(keys::CRITICIZED_HASH), Value::Text(h.criticized_hash.clone())),
        (key(keys::POST_ID), Value::Text(tx.post.post_id.clone())),
        (key(keys::PAYLOAD), Value::Bytes(tx.post.payload.to_vec())),
        (key(keys::POST_HASH), Value::Text(tx.post_hash.clone())),
        (key(keys::SIGNATURE), Value::Text(tx.signature.clone())),
        (key(keys::TRANSACTION_HASH), Value::Text(tx.transaction_hash.clone())),
    ])
}

fn cbor_value_to_transaction(value: &Value) -> Result<Transaction, CoreError> {
    let map = as_map(value).map_err(CoreError::DecodingError)?;
    if map.len() != 10 {
        return Err(CoreError::DecodingError(format!(
            "expected 10 transaction fields, got {}",
            map.len()
        )));
    }

    let text = |k: u64, name: &str| -> Result<String, CoreError> {
        match map_get(map, k) {
            Some(Value::Text(s)) => Ok(s.clone()),
            _ => Err(CoreError::DecodingError(format!("missing or invalid {name}"))),
        }
    };

    let tx_type = match map_get(map, keys::TYPE) {
        Some(Value::Integer(i)) => {
            let n = i128::from(*i);
            i32::try_from(n)
                .ok()
                .and_then(TransactionType::from_i32)
                .ok_or_else(|| CoreError::DecodingError(format!("invalid type tag: {n}")))?
        }
        _ => return Err(CoreError::DecodingError("missing type".into())),
    };

    let created_at = Timestamp::parse(&text(keys::CREATED_AT, "created_at")?)?;

    let payload = match map_get(map, keys::PAYLOAD) {
        Some(Value::Bytes(b)) => b.clone(),
        _ => return Err(CoreError::DecodingError("missing or invalid payload".into())),
    };

    Ok(Transaction {
        header: TransactionHeader {
            tx_type,
            created_at,
            from: text(keys::FROM, "from")?,
            to: text(keys::TO, "to")?,
            criticized_hash: text(keys::CRITICIZED_HASH, "criticized_hash")?,
        },
        post: PostData {
            post_id: text(keys::POST_ID, "post_id")?,
            payload: payload.into(),
        },
        post_hash: text(keys::POST_HASH, "post_hash")?,
        signature: text(keys::SIGNATURE, "signature")?,
        transaction_hash: text(keys::TRANSACTION_HASH, "transaction_hash")?,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

/// An integer map key.
pub(crate) fn key(k: u64) -> Value {
    Value::Integer(k.into())
}

/// Look up a value by integer key.
pub(crate) fn map_get(map: &[(Value, Value)], k: u64) -> Option<&Value> {
    map.iter()
        .find(|(mk, _)| matches!(mk, Value::Integer(i) if i128::from(*i) == i128::from(k)))
        .map(|(_, v)| v)
}

pub(crate) fn as_map(value: &Value) -> Result<&[(Value, Value)], String> {
    match value {
        Value::Map(m) => Ok(m),
        _ => Err("expected map".into()),
    }
}

/// Parse CBOR bytes and require them to be in canonical form.
pub(crate) fn decode_canonical(bytes: &[u8]) -> Result<Value, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    if !is_encodable(&value) || encode_cbor_value_canonical(&value) != bytes {
        return Err(CoreError::DecodingError("non-canonical encoding".into()));
    }
    Ok(value)
}

/// Whether the value only uses types the canonical encoder supports.
fn is_encodable(value: &Value) -> bool {
    match value {
        Value::Integer(_) | Value::Bytes(_) | Value::Text(_) | Value::Bool(_) | Value::Null => {
            true
        }
        Value::Array(arr) => arr.iter().all(is_encodable),
        Value::Map(entries) => entries
            .iter()
            .all(|(k, v)| is_encodable(k) && is_encodable(v)),
        _ => false,
    }
}

/// Encode a CBOR Value to canonical bytes.
///
/// Unsupported value kinds (floats, tags) are never produced by this crate
/// and are rejected by [`decode_canonical`] before reaching the encoder.
pub(crate) fn encode_cbor_value_canonical(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => {
            encode_uint(buf, 4, arr.len() as u64);
            for item in arr {
                encode_value_to(buf, item);
            }
        }
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        // Floats and tags never round-trip byte-identically; emit `undefined`
        // so the canonical comparison in `decode_canonical` fails.
        _ => buf.push(0xf7),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: Integer) {
    let n = i128::from(i);

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}
