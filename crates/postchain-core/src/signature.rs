//! ECDSA signatures over post hashes.
//!
//! Signing uses ECDSA on P-256 with the ASCII bytes of the post hash as the
//! message hash itself. No further digest is applied; the 128 hex characters
//! are truncated to the leftmost 32 bytes, as ECDSA does for any hash wider
//! than the curve order. The raw payload is never signed.
//!
//! A signature string is the hex of a canonical CBOR map `{0: R, 1: S}` where
//! R and S are 32-byte big-endian byte strings.

use ciborium::value::Value;
use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::FieldBytes;
use rand::{CryptoRng, RngCore};

use crate::canonical::{as_map, decode_canonical, encode_cbor_value_canonical, key, map_get};
use crate::error::CoreError;
use crate::keys::{PublicKey, COORDINATE_BYTES};

mod keys {
    pub const R: u64 = 0;
    pub const S: u64 = 1;
}

/// Scalar widths of other NIST curves, which we recognise but do not support.
const OTHER_CURVES: [(usize, &str); 3] = [(28, "P-224"), (48, "P-384"), (66, "P-521")];

/// Length of an encoded signature string in hex characters.
///
/// map(2) + key 0 + bstr(32) header + 32 bytes + key 1 + bstr(32) header + 32 bytes
pub const SIGNATURE_STRING_LEN: usize = 2 * (1 + 2 * (1 + 2 + COORDINATE_BYTES));

/// Sign a post hash with randomness drawn from `rng`.
pub fn sign_post_hash<R: RngCore + CryptoRng>(
    signing_key: &SigningKey,
    post_hash: &str,
    rng: &mut R,
) -> Result<String, CoreError> {
    let signature: Signature = signing_key
        .sign_prehash_with_rng(rng, post_hash.as_bytes())
        .map_err(|e| CoreError::SigningFailed(e.to_string()))?;
    Ok(encode_signature(&signature))
}

/// Check a decoded signature over a post hash. Returns `false` on mismatch.
pub fn verify_post_hash(public_key: &PublicKey, post_hash: &str, signature: &Signature) -> bool {
    VerifyingKey::from(public_key)
        .verify_prehash(post_hash.as_bytes(), signature)
        .is_ok()
}

/// Encode a signature as hex of canonical CBOR `{0: R, 1: S}`.
pub fn encode_signature(signature: &Signature) -> String {
    let (r, s) = signature.split_bytes();
    let value = Value::Map(vec![
        (key(keys::R), Value::Bytes(r.to_vec())),
        (key(keys::S), Value::Bytes(s.to_vec())),
    ]);
    hex::encode(encode_cbor_value_canonical(&value))
}

/// Decode a signature string into its (R, S) components.
pub fn decode_signature(s: &str) -> Result<Signature, CoreError> {
    let bytes = hex::decode(s).map_err(|e| CoreError::MalformedSignature(format!("hex: {e}")))?;
    let value = decode_canonical(&bytes).map_err(|e| CoreError::MalformedSignature(e.to_string()))?;
    let map = as_map(&value).map_err(CoreError::MalformedSignature)?;
    if map.len() != 2 {
        return Err(CoreError::MalformedSignature(format!(
            "expected 2 components, got {}",
            map.len()
        )));
    }

    let component = |k: u64, name: &str| -> Result<&[u8], CoreError> {
        match map_get(map, k) {
            Some(Value::Bytes(b)) => Ok(b.as_slice()),
            _ => Err(CoreError::MalformedSignature(format!("missing or invalid {name}"))),
        }
    };
    let r = component(keys::R, "R")?;
    let s = component(keys::S, "S")?;

    if r.len() != s.len() {
        return Err(CoreError::MalformedSignature(format!(
            "R and S differ in length ({} vs {})",
            r.len(),
            s.len()
        )));
    }
    if let Some((_, curve)) = OTHER_CURVES.iter().find(|(len, _)| *len == r.len()) {
        return Err(CoreError::UnsupportedCurve(format!(
            "{}-byte signature components look like {}",
            r.len(),
            curve
        )));
    }
    if r.len() != COORDINATE_BYTES {
        return Err(CoreError::MalformedSignature(format!(
            "expected {}-byte components, got {}",
            COORDINATE_BYTES,
            r.len()
        )));
    }

    Signature::from_scalars(*FieldBytes::from_slice(r), *FieldBytes::from_slice(s))
        .map_err(|_| CoreError::MalformedSignature("scalar out of range".into()))
}
