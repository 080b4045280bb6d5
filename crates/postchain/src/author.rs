//! The Author: a signing identity that publishes posts and critiques.

use bytes::Bytes;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use postchain_core::keys::{generate_signing_key, public_key_of};
use postchain_core::{
    decode_public_key, encode_public_key, validate_transaction, verify, PublicKey, SigningKey,
    Transaction, TransactionBuilder, TransactionType, ValidationError,
};

use crate::error::{Error, Result};

/// Configuration for an Author.
#[derive(Debug, Clone)]
pub struct AuthorConfig {
    /// Largest payload accepted, in bytes.
    pub max_payload_len: usize,
    /// Whether to verify every transaction right after building it.
    pub verify_after_build: bool,
    /// Whether to refuse critiquing a transaction that does not verify.
    pub verify_targets: bool,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            max_payload_len: 1024 * 1024,
            verify_after_build: true,
            verify_targets: true,
        }
    }
}

/// A signing identity.
///
/// The randomness source used for signatures is a type parameter so tests can
/// substitute a seeded generator; production code uses [`OsRng`].
pub struct Author<R = OsRng> {
    signing_key: SigningKey,
    public_key: PublicKey,
    key_string: String,
    rng: R,
    config: AuthorConfig,
}

impl Author<OsRng> {
    /// Create an author with a freshly generated key.
    pub fn generate(config: AuthorConfig) -> Self {
        Self::from_signing_key(generate_signing_key(&mut OsRng), config)
    }

    /// Create an author from an existing key.
    pub fn from_signing_key(signing_key: SigningKey, config: AuthorConfig) -> Self {
        Self::with_rng(signing_key, OsRng, config)
    }
}

impl<R: RngCore + CryptoRng> Author<R> {
    /// Create an author that draws signing randomness from `rng`.
    pub fn with_rng(signing_key: SigningKey, rng: R, config: AuthorConfig) -> Self {
        let public_key = public_key_of(&signing_key);
        let key_string = encode_public_key(&public_key);
        Self {
            signing_key,
            public_key,
            key_string,
            rng,
            config,
        }
    }

    /// The author's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The author's canonical key string, as it appears in headers.
    pub fn key_string(&self) -> &str {
        &self.key_string
    }

    pub fn config(&self) -> &AuthorConfig {
        &self.config
    }

    /// Publish a post.
    pub fn post(&mut self, payload: impl Into<Bytes>) -> Result<Transaction> {
        let builder = TransactionBuilder::new(self.public_key, TransactionType::Post);
        self.finish(builder, payload.into())
    }

    /// Critique an existing transaction, addressed to its sender.
    pub fn critique(&mut self, target: &Transaction, payload: impl Into<Bytes>) -> Result<Transaction> {
        if self.config.verify_targets && !verify(target)? {
            return Err(Error::InvalidTarget(target.transaction_hash.clone()));
        }

        let receiver = decode_public_key(&target.header.from)?;
        let builder = TransactionBuilder::new(self.public_key, TransactionType::Critique)
            .receiver(receiver)
            .criticizes(target.transaction_hash.clone());
        self.finish(builder, payload.into())
    }

    fn finish(&mut self, builder: TransactionBuilder, payload: Bytes) -> Result<Transaction> {
        if payload.len() > self.config.max_payload_len {
            return Err(Error::PayloadTooLarge {
                len: payload.len(),
                max: self.config.max_payload_len,
            });
        }

        let tx = builder
            .payload(payload)
            .sign_with_rng(&self.signing_key, &mut self.rng)?;

        if self.config.verify_after_build {
            if let Err(e) = validate_transaction(&tx) {
                tracing::warn!(tx = %tx.transaction_hash, error = %e, "built transaction failed self-check");
                return Err(Error::SelfCheckFailed(tx.transaction_hash));
            }
        }

        tracing::debug!(
            tx = %tx.transaction_hash,
            kind = %tx.header.tx_type,
            payload_len = tx.post.payload.len(),
            "built transaction"
        );
        Ok(tx)
    }
}

/// Verify a transaction, logging the reason when it does not verify.
pub fn check(tx: &Transaction) -> Result<bool> {
    match validate_transaction(tx) {
        Ok(()) => Ok(true),
        Err(ValidationError::Malformed(e)) => {
            tracing::warn!(tx = %tx.transaction_hash, error = %e, "transaction could not be decoded");
            Err(e.into())
        }
        Err(reason) => {
            tracing::warn!(tx = %tx.transaction_hash, %reason, "transaction did not verify");
            Ok(false)
        }
    }
}
