//! Property tests for key strings, hashing, signing and tamper detection.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use postchain::core::keys::{generate_signing_key, public_key_of};
use postchain::{
    decode_public_key, encode_public_key, hash_post, verify, SigningKey, Timestamp, Transaction,
    TransactionBuilder, TransactionType,
};

fn key_from_seed(seed: u64) -> SigningKey {
    generate_signing_key(&mut StdRng::seed_from_u64(seed))
}

fn post(key: &SigningKey, payload: &[u8], nanos: i64, rng_seed: u64) -> Transaction {
    TransactionBuilder::new(public_key_of(key), TransactionType::Post)
        .payload(payload.to_vec())
        .created_at(Timestamp::from_unix_nanos(nanos))
        .sign_with_rng(key, &mut StdRng::seed_from_u64(rng_seed))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn key_string_roundtrip(seed in any::<u64>()) {
        let public = public_key_of(&key_from_seed(seed));
        let s = encode_public_key(&public);

        prop_assert_eq!(s.len(), 128);
        prop_assert_eq!(decode_public_key(&s).unwrap(), public);
    }

    #[test]
    fn hash_post_is_deterministic(
        payload in prop::collection::vec(any::<u8>(), 0..256),
        nanos in 0i64..=i64::MAX,
    ) {
        let ts = Timestamp::from_unix_nanos(nanos);
        prop_assert_eq!(hash_post(&payload, &ts), hash_post(&payload, &ts));
    }

    #[test]
    fn hash_post_sensitive_to_one_byte(
        payload in prop::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
        nanos in 0i64..=i64::MAX,
    ) {
        let ts = Timestamp::from_unix_nanos(nanos);
        let mut changed = payload.clone();
        let i = index.index(changed.len());
        changed[i] ^= flip;

        prop_assert_ne!(
            hash_post(&payload, &ts).post_hash,
            hash_post(&changed, &ts).post_hash
        );
    }

    #[test]
    fn hash_post_sensitive_to_time(
        payload in prop::collection::vec(any::<u8>(), 0..64),
        nanos in 0i64..i64::MAX,
    ) {
        let a = hash_post(&payload, &Timestamp::from_unix_nanos(nanos));
        let b = hash_post(&payload, &Timestamp::from_unix_nanos(nanos + 1));
        prop_assert_ne!(a.post_hash, b.post_hash);
    }

    #[test]
    fn built_transactions_verify(
        seed in any::<u64>(),
        payload in prop::collection::vec(any::<u8>(), 0..256),
        nanos in 0i64..=i64::MAX,
    ) {
        let tx = post(&key_from_seed(seed), &payload, nanos, seed ^ 1);
        prop_assert!(verify(&tx).unwrap());
    }

    #[test]
    fn mutated_post_hash_fails(
        seed in any::<u64>(),
        index in any::<prop::sample::Index>(),
    ) {
        let mut tx = post(&key_from_seed(seed), b"payload", 1_700_000_000_000_000_000, seed);
        let i = index.index(tx.post_hash.len());
        let c = tx.post_hash.as_bytes()[i];
        let replacement = if c == b'0' { "1" } else { "0" };
        tx.post_hash.replace_range(i..=i, replacement);

        prop_assert!(!verify(&tx).unwrap());
    }

    #[test]
    fn flipped_signature_scalar_digit_fails(
        seed in any::<u64>(),
        in_s in any::<bool>(),
        offset in 0usize..64,
        flip in 1u8..16,
    ) {
        let mut tx = post(&key_from_seed(seed), b"payload", 1_700_000_000_000_000_000, seed);
        // a2 00 5820 <R: 64 hex> 01 5820 <S: 64 hex>
        prop_assert!(tx.signature.starts_with("a2005820"));
        let i = if in_s { 78 + offset } else { 8 + offset };

        let digit = u8::from_str_radix(&tx.signature[i..=i], 16).unwrap();
        let flipped = format!("{:x}", digit ^ flip);
        tx.signature.replace_range(i..=i, &flipped);

        prop_assert_eq!(verify(&tx), Ok(false));
    }

    #[test]
    fn foreign_signature_fails(a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        let mut tx = post(&key_from_seed(a), b"payload", 1_700_000_000_000_000_000, 1);
        let other = post(&key_from_seed(b), b"payload", 1_700_000_000_000_000_000, 1);
        tx.signature = other.signature;

        prop_assert!(!verify(&tx).unwrap());
    }

    #[test]
    fn replaced_sender_fails(a in any::<u64>(), b in any::<u64>()) {
        prop_assume!(a != b);
        let mut tx = post(&key_from_seed(a), b"payload", 1_700_000_000_000_000_000, 1);
        tx.header.from = encode_public_key(&public_key_of(&key_from_seed(b)));

        prop_assert!(!verify(&tx).unwrap());
    }
}
