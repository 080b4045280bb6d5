//! Content hashing: post identifiers and transaction identifiers.
//!
//! The hash chain is:
//!
//! ```text
//! post_hash        = hex(SHA-512(payload || ts))
//! post_id          = hex(SHA-224(post_hash || ts))
//! type_time        = hex(SHA-512(be32(type) || ts))
//! transaction_hash = hex(SHA-224(type_time || post_hash))
//! ```
//!
//! where `ts` is [`Timestamp::canonical_string`]. The payload reaches the
//! transaction hash only through `post_hash`. The chaining order is part of
//! the wire contract and must not change.

use sha2::{Digest, Sha224, Sha512};

use crate::types::{Timestamp, TransactionType};

/// Length of a post hash in hex characters (SHA-512).
pub const POST_HASH_LEN: usize = 128;

/// Length of a post id in hex characters (SHA-224).
pub const POST_ID_LEN: usize = 56;

/// Length of a transaction hash in hex characters (SHA-224).
pub const TRANSACTION_HASH_LEN: usize = 56;

/// The two identifiers derived from a post's payload and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDigest {
    pub post_hash: String,
    pub post_id: String,
}

/// Hash a payload and its creation time into `(post_hash, post_id)`.
pub fn hash_post(payload: &[u8], created_at: &Timestamp) -> PostDigest {
    let ts = created_at.canonical_string();

    let post_hash = hex::encode(
        Sha512::new()
            .chain_update(payload)
            .chain_update(ts.as_bytes())
            .finalize(),
    );
    let post_id = hex::encode(
        Sha224::new()
            .chain_update(post_hash.as_bytes())
            .chain_update(ts.as_bytes())
            .finalize(),
    );

    PostDigest { post_hash, post_id }
}

/// Hash a transaction's type and creation time, chained with its post hash.
pub fn hash_transaction(
    tx_type: TransactionType,
    created_at: &Timestamp,
    post_hash: &str,
) -> String {
    let ts = created_at.canonical_string();

    let type_time = hex::encode(
        Sha512::new()
            .chain_update(tx_type.to_be_bytes())
            .chain_update(ts.as_bytes())
            .finalize(),
    );

    hex::encode(
        Sha224::new()
            .chain_update(type_time.as_bytes())
            .chain_update(post_hash.as_bytes())
            .finalize(),
    )
}

/// Check that `s` is exactly `len` lowercase hex characters.
pub fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
