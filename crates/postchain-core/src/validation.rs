//! Transaction validation: signature verification and structural checks.

use crate::error::{CoreError, ValidationError};
use crate::hash::{
    hash_post, hash_transaction, is_lower_hex, POST_HASH_LEN, POST_ID_LEN, TRANSACTION_HASH_LEN,
};
use crate::keys::{decode_public_key, KEY_STRING_LEN};
use crate::signature::{decode_signature, verify_post_hash};
use crate::transaction::Transaction;

/// Validate a transaction, reporting the first reason it fails.
///
/// This performs, in order:
/// - Signature decoding
/// - Sender key decoding
/// - Header invariant
/// - Post hash, post id and transaction hash recomputation
/// - Signature verification over the post hash
pub fn validate_transaction(tx: &Transaction) -> Result<(), ValidationError> {
    let signature = decode_signature(&tx.signature)?;
    let sender = decode_public_key(&tx.header.from)?;

    tx.header
        .check_invariant()
        .map_err(|e| ValidationError::HeaderInvariant(e.to_string()))?;

    let digest = hash_post(&tx.post.payload, &tx.header.created_at);
    if digest.post_hash != tx.post_hash {
        return Err(ValidationError::PostHashMismatch);
    }
    if digest.post_id != tx.post.post_id {
        return Err(ValidationError::PostIdMismatch);
    }

    let transaction_hash = hash_transaction(tx.header.tx_type, &tx.header.created_at, &tx.post_hash);
    if transaction_hash != tx.transaction_hash {
        return Err(ValidationError::TransactionHashMismatch);
    }

    if !verify_post_hash(&sender, &tx.post_hash, &signature) {
        return Err(ValidationError::SignatureFailed);
    }

    Ok(())
}

/// Verify a transaction.
///
/// Returns `Ok(false)` for any cryptographic or identifier mismatch. Only a
/// signature or sender key that cannot be decoded is an error.
pub fn verify(tx: &Transaction) -> Result<bool, CoreError> {
    match validate_transaction(tx) {
        Ok(()) => Ok(true),
        Err(ValidationError::Malformed(e)) => Err(e),
        Err(_) => Ok(false),
    }
}

/// Validate transaction shape without any hashing or cryptography.
///
/// Useful as a cheap filter before [`validate_transaction`].
pub fn validate_transaction_structure(tx: &Transaction) -> Result<(), ValidationError> {
    tx.header
        .check_invariant()
        .map_err(|e| ValidationError::HeaderInvariant(e.to_string()))?;

    if tx.header.from.len() != KEY_STRING_LEN {
        return Err(ValidationError::StructuralError("sender key has wrong length".into()));
    }
    if tx.is_critique() {
        if tx.header.to.len() != KEY_STRING_LEN {
            return Err(ValidationError::StructuralError(
                "receiver key has wrong length".into(),
            ));
        }
        if !is_lower_hex(&tx.header.criticized_hash, TRANSACTION_HASH_LEN) {
            return Err(ValidationError::StructuralError(
                "criticized hash is not a transaction hash".into(),
            ));
        }
    }
    if !is_lower_hex(&tx.post_hash, POST_HASH_LEN) {
        return Err(ValidationError::StructuralError("malformed post hash".into()));
    }
    if !is_lower_hex(&tx.post.post_id, POST_ID_LEN) {
        return Err(ValidationError::StructuralError("malformed post id".into()));
    }
    if !is_lower_hex(&tx.transaction_hash, TRANSACTION_HASH_LEN) {
        return Err(ValidationError::StructuralError("malformed transaction hash".into()));
    }
    if tx.signature.is_empty() {
        return Err(ValidationError::StructuralError("unsigned transaction".into()));
    }

    Ok(())
}
