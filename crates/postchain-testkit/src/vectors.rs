//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of Postchain must produce identical:
//! - post_hash
//! - post_id
//! - transaction_hash
//! - canonical key strings
//!
//! Signatures are randomized and have no golden value; they are checked by
//! verification instead.

use postchain_core::keys::public_key_of;
use postchain_core::{
    encode_public_key, hash_post, hash_transaction, SigningKey, Timestamp, TransactionType,
};
use serde::{Deserialize, Serialize};

/// A hash-chain test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub payload: String, // hex
    pub created_at: String,
    pub tx_type: i32,

    // Expected outputs
    pub post_hash: String,
    pub post_id: String,
    pub transaction_hash: String,
}

/// A key-string test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyVector {
    pub name: String,
    pub secret_scalar: String, // 32 bytes hex
    pub key_string: String,
}

/// Get all hash-chain vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello_world_post".into(),
            description: "The canonical Hello World post".into(),
            payload: hex::encode(b"Hello World"),
            created_at: "2023-11-14T22:13:20.123456789Z".into(),
            tx_type: 0,
            post_hash: "a774354eaeb182cce64ebe9e9309295710bdb45b37ea73eb871937151fc9040d678aab3ea856379ba42c0c091b8c1995228f4ab4fb5f97c12b9941a308b20cd7".into(),
            post_id: "b9fc9f5bf8b5c99754a807ffbf6628049e285ebfd667d7a11a91c1b7".into(),
            transaction_hash: "4dda175cf91f0b350d08babb2261e1dc11103a1254a277d3aeb059ae".into(),
        },
        GoldenVector {
            name: "empty_payload_whole_second".into(),
            description: "Empty payload; fractional seconds still rendered as nine zeros".into(),
            payload: String::new(),
            created_at: "2023-11-14T22:13:20.000000000Z".into(),
            tx_type: 0,
            post_hash: "21f783b6a04a02d68c748330a82c5b34643f2b14d3df6fdabb75f2bb7c3b4997827ac0564286064aac1e5c42ef2375735c5aa5f261f688a6f12a66edf90d6a52".into(),
            post_id: "8c9d4b0e043c5a2e405df9588409109b41386b953e7446b4119a30a7".into(),
            transaction_hash: "2fab49d3536fa125a782da90813f2016c2d00c69c243be35dc7fad9c".into(),
        },
        GoldenVector {
            name: "critique_one_nanosecond".into(),
            description: "Critique type tag with a single trailing nanosecond".into(),
            payload: hex::encode(b"I disagree"),
            created_at: "2025-01-14T16:00:00.000000001Z".into(),
            tx_type: 1,
            post_hash: "2361c7807080fc66a3989d1b3beff2b3668196359574abe8e7885d6e31d58f9e122ee825f504cc098b1b8add8884dc1044a2cdd42d2c00cf458a92f75fdd3b0d".into(),
            post_id: "eff0903553baeb6987ce83ce087991eec678d94c0c201cf62392e69f".into(),
            transaction_hash: "cc94d81da3ef83e296fd7aa2535a749a6393d48a14ab3c42f113139c".into(),
        },
    ]
}

/// Get all key-string vectors.
pub fn key_vectors() -> Vec<KeyVector> {
    vec![
        KeyVector {
            name: "generator".into(),
            secret_scalar: format!("{:064x}", 1),
            key_string: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c2964fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5".into(),
        },
        KeyVector {
            name: "scalar_0x42".into(),
            secret_scalar: format!("{:064x}", 0x42),
            key_string: "27dc812de9374f35b5ff02901dd3f0225bddad4dafed3f1dfcc068c9e0f5ab7b8ed95e95d913435e93e5ac18196c1eb88df7156b3ed0f3cc7f9095857eb0ffde".into(),
        },
    ]
}

/// Check one hash-chain vector, returning a description of the first mismatch.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    let payload = hex::decode(&vector.payload).map_err(|e| format!("{}: payload: {e}", vector.name))?;
    let created_at = Timestamp::parse(&vector.created_at).map_err(|e| format!("{}: {e}", vector.name))?;
    let tx_type = TransactionType::from_i32(vector.tx_type)
        .ok_or_else(|| format!("{}: unknown type {}", vector.name, vector.tx_type))?;

    let digest = hash_post(&payload, &created_at);
    if digest.post_hash != vector.post_hash {
        return Err(format!("{}: post_hash {}", vector.name, digest.post_hash));
    }
    if digest.post_id != vector.post_id {
        return Err(format!("{}: post_id {}", vector.name, digest.post_id));
    }
    let transaction_hash = hash_transaction(tx_type, &created_at, &digest.post_hash);
    if transaction_hash != vector.transaction_hash {
        return Err(format!("{}: transaction_hash {}", vector.name, transaction_hash));
    }
    Ok(())
}

/// Check one key vector.
pub fn check_key_vector(vector: &KeyVector) -> Result<(), String> {
    let scalar = hex::decode(&vector.secret_scalar).map_err(|e| format!("{}: {e}", vector.name))?;
    let key = SigningKey::from_slice(&scalar).map_err(|e| format!("{}: {e}", vector.name))?;
    let encoded = encode_public_key(&public_key_of(&key));
    if encoded != vector.key_string {
        return Err(format!("{}: key_string {}", vector.name, encoded));
    }
    Ok(())
}

/// Verify every golden vector.
pub fn verify_all_vectors() -> Result<(), String> {
    all_vectors().iter().try_for_each(check_vector)?;
    key_vectors().iter().try_for_each(check_key_vector)
}

/// Export all vectors as pretty JSON for other implementations.
pub fn vectors_json() -> String {
    let doc = serde_json::json!({
        "hash_chain": all_vectors(),
        "key_strings": key_vectors(),
    });
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}
