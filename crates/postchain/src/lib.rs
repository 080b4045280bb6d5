//! # Postchain
//!
//! Signed, content-addressed posts and critiques.
//!
//! ## Overview
//!
//! - **Post**: a payload published by an author, identified by its hash chain
//! - **Critique**: a transaction that answers a prior transaction and is
//!   addressed to that transaction's sender
//! - **Author**: a P-256 signing identity that builds both
//!
//! ## Usage
//!
//! ```rust
//! use postchain::{check, Author, AuthorConfig};
//!
//! let mut alice = Author::generate(AuthorConfig::default());
//! let mut bob = Author::generate(AuthorConfig::default());
//!
//! let post = alice.post("Hello World").unwrap();
//! let critique = bob.critique(&post, "I disagree").unwrap();
//!
//! assert!(check(&post).unwrap());
//! assert_eq!(critique.header.to, alice.key_string());
//! ```
//!
//! ## Re-exports
//!
//! - `postchain::core` - Core primitives (Transaction, key codec, hashing)

pub mod author;
pub mod error;

pub use postchain_core as core;

pub use author::{check, Author, AuthorConfig};
pub use error::{Error, Result};

pub use postchain_core::{
    canonical_bytes, decode_public_key, decode_transaction, encode_public_key, hash_post,
    hash_transaction, verify, CoreError, PublicKey, SigningKey, Timestamp, Transaction,
    TransactionBuilder, TransactionType, ValidationError,
};
