//! Canonical key strings.
//!
//! A public key is identified by the lowercase hex of its affine X and Y
//! coordinates, each padded to the curve's full coordinate width. This is the
//! only form in which keys appear in transaction headers.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{CryptoRng, RngCore};

pub use p256::ecdsa::SigningKey;
pub use p256::PublicKey;

use crate::error::CoreError;

/// Byte width of one P-256 coordinate.
pub const COORDINATE_BYTES: usize = 32;

/// Length of a canonical key string (hex of X || Y).
pub const KEY_STRING_LEN: usize = 4 * COORDINATE_BYTES;

/// SEC1 tag for an uncompressed point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Key string widths of other NIST curves, which we recognise but do not support.
const OTHER_CURVES: [(usize, &str); 3] = [(112, "P-224"), (192, "P-384"), (264, "P-521")];

/// Encode a public key as its canonical 128-character string.
pub fn encode_public_key(key: &PublicKey) -> String {
    let point = key.to_encoded_point(false);
    // Uncompressed SEC1: 0x04 || X (32 bytes) || Y (32 bytes)
    hex::encode(&point.as_bytes()[1..])
}

/// Decode a canonical key string back into a point on P-256.
pub fn decode_public_key(s: &str) -> Result<PublicKey, CoreError> {
    if let Some((_, curve)) = OTHER_CURVES.iter().find(|(len, _)| *len == s.len()) {
        return Err(CoreError::UnsupportedCurve(format!(
            "key string of length {} looks like a {} key",
            s.len(),
            curve
        )));
    }
    if s.len() != KEY_STRING_LEN {
        return Err(CoreError::MalformedKey(format!(
            "expected {} hex characters, got {}",
            KEY_STRING_LEN,
            s.len()
        )));
    }
    if !s.is_ascii() {
        return Err(CoreError::MalformedKey("non-hex characters".into()));
    }

    let (x_hex, y_hex) = s.split_at(KEY_STRING_LEN / 2);
    let x = hex::decode(x_hex).map_err(|e| CoreError::MalformedKey(format!("x coordinate: {e}")))?;
    let y = hex::decode(y_hex).map_err(|e| CoreError::MalformedKey(format!("y coordinate: {e}")))?;

    let mut sec1 = Vec::with_capacity(1 + 2 * COORDINATE_BYTES);
    sec1.push(SEC1_UNCOMPRESSED);
    sec1.extend_from_slice(&x);
    sec1.extend_from_slice(&y);

    PublicKey::from_sec1_bytes(&sec1)
        .map_err(|_| CoreError::MalformedKey("point is not on P-256".into()))
}

/// Generate a fresh signing key from the given randomness source.
pub fn generate_signing_key<R: RngCore + CryptoRng>(rng: &mut R) -> SigningKey {
    SigningKey::random(rng)
}

/// The public half of a signing key.
pub fn public_key_of(signing_key: &SigningKey) -> PublicKey {
    PublicKey::from(signing_key.verifying_key())
}
