//! Transaction: a signed, content-addressed post or critique.
//!
//! A transaction is built in one step: header, post hash, transaction hash,
//! signature. After that only the signature may be recomputed; the header,
//! post data and hashes never change.

use bytes::Bytes;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::hash::{hash_post, hash_transaction};
use crate::keys::{encode_public_key, PublicKey, SigningKey};
use crate::signature::sign_post_hash;
use crate::types::{Timestamp, TransactionType};

/// Who sent a transaction, when, and what it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub tx_type: TransactionType,

    /// Assigned at build time.
    pub created_at: Timestamp,

    /// Canonical key string of the sender.
    pub from: String,

    /// Canonical key string of the receiver. Empty for posts.
    pub to: String,

    /// Transaction hash of the critiqued transaction. Empty for posts.
    pub criticized_hash: String,
}

impl TransactionHeader {
    /// Check the post/critique invariant: `to` and `criticized_hash` are both
    /// empty for a post and both set for a critique. `from` is always set.
    pub fn check_invariant(&self) -> Result<(), CoreError> {
        if self.from.is_empty() {
            return Err(CoreError::InvalidHeader("sender is required".into()));
        }
        match self.tx_type {
            TransactionType::Post => {
                if !self.to.is_empty() {
                    return Err(CoreError::InvalidHeader("a post has no receiver".into()));
                }
                if !self.criticized_hash.is_empty() {
                    return Err(CoreError::InvalidHeader(
                        "a post cannot criticize a transaction".into(),
                    ));
                }
            }
            TransactionType::Critique => {
                if self.to.is_empty() {
                    return Err(CoreError::InvalidHeader("a critique needs a receiver".into()));
                }
                if self.criticized_hash.is_empty() {
                    return Err(CoreError::InvalidHeader(
                        "a critique needs the criticized transaction hash".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The content carried by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostData {
    /// Derived from the post hash and creation time.
    pub post_id: String,

    pub payload: Bytes,
}

/// A complete transaction: header, post, hash chain and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: TransactionHeader,

    pub post: PostData,

    /// hex(SHA-512(payload || created_at)).
    pub post_hash: String,

    /// Hex of the canonical CBOR (R, S) pair, signed over `post_hash`.
    pub signature: String,

    /// hex(SHA-224(hex(SHA-512(type || created_at)) || post_hash)).
    pub transaction_hash: String,
}

impl Transaction {
    /// Build and sign a transaction, stamping the current time.
    ///
    /// For a post, `receiver` is ignored and `criticized_hash` must be empty.
    /// For a critique, `criticized_hash` must be set.
    pub fn build(
        signing_key: &SigningKey,
        sender: &PublicKey,
        receiver: &PublicKey,
        payload: impl Into<Bytes>,
        tx_type: TransactionType,
        criticized_hash: &str,
    ) -> Result<Self, CoreError> {
        let mut builder = TransactionBuilder::new(*sender, tx_type).payload(payload);
        if tx_type == TransactionType::Critique {
            builder = builder.receiver(*receiver);
        }
        if !criticized_hash.is_empty() {
            builder = builder.criticizes(criticized_hash);
        }
        builder.sign(signing_key)
    }

    /// Recompute the signature over the (unchanged) post hash.
    pub fn resign<R: RngCore + CryptoRng>(
        &mut self,
        signing_key: &SigningKey,
        rng: &mut R,
    ) -> Result<(), CoreError> {
        self.signature = sign_post_hash(signing_key, &self.post_hash, rng)?;
        Ok(())
    }

    pub fn is_post(&self) -> bool {
        self.header.tx_type == TransactionType::Post
    }

    pub fn is_critique(&self) -> bool {
        self.header.tx_type == TransactionType::Critique
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.post.payload
    }
}

/// Builder for creating transactions.
pub struct TransactionBuilder {
    sender: PublicKey,
    tx_type: TransactionType,
    receiver: Option<PublicKey>,
    criticized_hash: String,
    payload: Bytes,
    created_at: Option<Timestamp>,
}

impl TransactionBuilder {
    /// Start building a transaction.
    pub fn new(sender: PublicKey, tx_type: TransactionType) -> Self {
        Self {
            sender,
            tx_type,
            receiver: None,
            criticized_hash: String::new(),
            payload: Bytes::new(),
            created_at: None,
        }
    }

    /// Set the receiver (critiques only).
    pub fn receiver(mut self, receiver: PublicKey) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Set the hash of the criticized transaction (critiques only).
    pub fn criticizes(mut self, transaction_hash: impl Into<String>) -> Self {
        self.criticized_hash = transaction_hash.into();
        self
    }

    /// Set the payload.
    pub fn payload(mut self, p: impl Into<Bytes>) -> Self {
        self.payload = p.into();
        self
    }

    /// Pin the creation time instead of reading the clock.
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Build and sign using the operating system's randomness.
    pub fn sign(self, signing_key: &SigningKey) -> Result<Transaction, CoreError> {
        self.sign_with_rng(signing_key, &mut OsRng)
    }

    /// Build and sign using the given randomness source.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        self,
        signing_key: &SigningKey,
        rng: &mut R,
    ) -> Result<Transaction, CoreError> {
        let header = TransactionHeader {
            tx_type: self.tx_type,
            created_at: self.created_at.unwrap_or_else(Timestamp::now),
            from: encode_public_key(&self.sender),
            to: self.receiver.as_ref().map(encode_public_key).unwrap_or_default(),
            criticized_hash: self.criticized_hash,
        };
        header.check_invariant()?;

        let digest = hash_post(&self.payload, &header.created_at);
        let transaction_hash =
            hash_transaction(header.tx_type, &header.created_at, &digest.post_hash);
        let signature = sign_post_hash(signing_key, &digest.post_hash, rng)?;

        Ok(Transaction {
            header,
            post: PostData {
                post_id: digest.post_id,
                payload: self.payload,
            },
            post_hash: digest.post_hash,
            signature,
            transaction_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{is_lower_hex, POST_HASH_LEN, POST_ID_LEN, TRANSACTION_HASH_LEN};
    use crate::keys::{generate_signing_key, public_key_of};
    use crate::validation::verify;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn keypair(seed: u64) -> (SigningKey, PublicKey) {
        let key = generate_signing_key(&mut StdRng::seed_from_u64(seed));
        let public = public_key_of(&key);
        (key, public)
    }

    #[test]
    fn test_build_hello_world_post() {
        let (key, public) = keypair(1);
        let tx = Transaction::build(
            &key,
            &public,
            &public,
            b"Hello World".to_vec(),
            TransactionType::Post,
            "",
        )
        .unwrap();

        assert_eq!(tx.header.to, "");
        assert_eq!(tx.header.criticized_hash, "");
        assert_eq!(tx.header.from, encode_public_key(&public));
        assert!(is_lower_hex(&tx.post_hash, POST_HASH_LEN));
        assert!(is_lower_hex(&tx.post.post_id, POST_ID_LEN));
        assert!(is_lower_hex(&tx.transaction_hash, TRANSACTION_HASH_LEN));
        assert_eq!(tx.payload(), b"Hello World");
        assert!(tx.is_post());
        assert!(verify(&tx).unwrap());
    }

    #[test]
    fn test_build_critique() {
        let (alice_key, alice) = keypair(1);
        let (bob_key, bob) = keypair(2);

        let post = Transaction::build(&alice_key, &alice, &alice, "first", TransactionType::Post, "")
            .unwrap();
        let critique = Transaction::build(
            &bob_key,
            &bob,
            &alice,
            "disagree",
            TransactionType::Critique,
            &post.transaction_hash,
        )
        .unwrap();

        assert!(critique.is_critique());
        assert_eq!(critique.header.to, post.header.from);
        assert_eq!(critique.header.criticized_hash, post.transaction_hash);
        assert!(verify(&critique).unwrap());
    }

    #[test]
    fn test_post_with_criticized_hash_rejected() {
        let (key, public) = keypair(1);
        let result = Transaction::build(
            &key,
            &public,
            &public,
            "x",
            TransactionType::Post,
            "nonempty",
        );
        assert!(matches!(result, Err(CoreError::InvalidHeader(_))));
    }

    #[test]
    fn test_critique_without_criticized_hash_rejected() {
        let (key, public) = keypair(1);
        let result = Transaction::build(&key, &public, &public, "x", TransactionType::Critique, "");
        assert!(matches!(result, Err(CoreError::InvalidHeader(_))));
    }

    #[test]
    fn test_builder_post_with_receiver_rejected() {
        let (key, public) = keypair(1);
        let result = TransactionBuilder::new(public, TransactionType::Post)
            .receiver(public)
            .payload("x")
            .sign(&key);
        assert!(matches!(result, Err(CoreError::InvalidHeader(_))));
    }

    #[test]
    fn test_builder_critique_without_receiver_rejected() {
        let (key, public) = keypair(1);
        let result = TransactionBuilder::new(public, TransactionType::Critique)
            .criticizes("ab".repeat(28))
            .sign(&key);
        assert!(matches!(result, Err(CoreError::InvalidHeader(_))));
    }

    #[test]
    fn test_pinned_time_and_rng_are_reproducible() {
        let (key, public) = keypair(1);
        let ts = Timestamp::from_unix_nanos(1_700_000_000_123_456_789);
        let build = |seed: u64| {
            TransactionBuilder::new(public, TransactionType::Post)
                .payload("same")
                .created_at(ts)
                .sign_with_rng(&key, &mut StdRng::seed_from_u64(seed))
                .unwrap()
        };

        let a = build(9);
        let b = build(9);
        assert_eq!(a, b);

        let c = build(10);
        assert_eq!(a.transaction_hash, c.transaction_hash);
        assert_ne!(a.signature, c.signature);
    }

    #[test]
    fn test_resign_keeps_hashes() {
        let (key, public) = keypair(1);
        let mut tx = TransactionBuilder::new(public, TransactionType::Post)
            .payload("content")
            .sign(&key)
            .unwrap();
        let before = tx.clone();

        tx.resign(&key, &mut StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(tx.header, before.header);
        assert_eq!(tx.post, before.post);
        assert_eq!(tx.post_hash, before.post_hash);
        assert_eq!(tx.transaction_hash, before.transaction_hash);
        assert!(verify(&tx).unwrap());
    }

    #[test]
    fn test_check_invariant_requires_sender() {
        let header = TransactionHeader {
            tx_type: TransactionType::Post,
            created_at: Timestamp::now(),
            from: String::new(),
            to: String::new(),
            criticized_hash: String::new(),
        };
        assert!(matches!(
            header.check_invariant(),
            Err(CoreError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let (key, public) = keypair(3);
        let tx = TransactionBuilder::new(public, TransactionType::Post)
            .payload(vec![0u8, 159, 146, 150])
            .sign(&key)
            .unwrap();

        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
