//! # Postchain Core
//!
//! Pure primitives for Postchain: canonical key strings, content hashing, and
//! signed post/critique transactions.
//!
//! This crate contains no I/O, no storage, no networking. The only outside
//! inputs are the wall clock (unless a timestamp is pinned) and a randomness
//! source for signing, which callers may inject.
//!
//! ## Key Types
//!
//! - [`Transaction`] - A signed post or critique with its hash chain
//! - [`TransactionBuilder`] - Fluent construction with pinned time or RNG
//! - [`TransactionType`] - `Post` or `Critique`
//! - [`Timestamp`] - Nanosecond UTC instant with one canonical rendering
//!
//! ## Hashing
//!
//! `post_hash = SHA-512(payload || ts)`, `post_id = SHA-224(post_hash || ts)`,
//! `transaction_hash = SHA-224(SHA-512(type || ts) || post_hash)`. See [`hash`].
//!
//! ## Wire Format
//!
//! Transactions and signatures are encoded as deterministic CBOR. See [`canonical`].

pub mod canonical;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod keys;
pub mod signature;
pub mod transaction;
pub mod types;
pub mod validation;

pub use canonical::{canonical_bytes, decode_transaction};
pub use envelope::{
    ChaincodeCall, ChaincodeEvent, ChaincodeInterest, Endorsement, Envelope, OpaqueMessage,
    OpaqueRecord, ProposalResponse, ProposalResponsePayload, Response,
};
pub use error::{CoreError, ValidationError};
pub use hash::{hash_post, hash_transaction, PostDigest};
pub use keys::{decode_public_key, encode_public_key, PublicKey, SigningKey};
pub use signature::{decode_signature, encode_signature};
pub use transaction::{PostData, Transaction, TransactionBuilder, TransactionHeader};
pub use types::{Timestamp, TransactionType};
pub use validation::{validate_transaction, validate_transaction_structure, verify};
