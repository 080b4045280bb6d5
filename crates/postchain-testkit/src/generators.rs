//! Proptest generators for property-based testing.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use postchain_core::keys::{generate_signing_key, public_key_of};
use postchain_core::{
    PublicKey, SigningKey, Timestamp, Transaction, TransactionBuilder, TransactionType,
};

/// Generate a signing key from a random seed.
pub fn signing_key() -> impl Strategy<Value = SigningKey> {
    any::<u64>().prop_map(|seed| generate_signing_key(&mut StdRng::seed_from_u64(seed)))
}

/// Generate a public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    signing_key().prop_map(|k| public_key_of(&k))
}

/// Generate a timestamp between 1970 and roughly 2262.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (0i64..=i64::MAX).prop_map(Timestamp::from_unix_nanos)
}

/// Generate a TransactionType.
pub fn tx_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Post), Just(TransactionType::Critique)]
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a well-formed transaction hash to criticize.
pub fn transaction_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{56}".prop_map(String::from)
}

/// Parameters for generating a transaction.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub key_seed: u64,
    pub rng_seed: u64,
    pub tx_type: TransactionType,
    pub created_at: Timestamp,
    pub payload: Vec<u8>,
    pub receiver_seed: u64,
    pub criticized_hash: String,
}

impl Arbitrary for TransactionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<u64>(),
            any::<u64>(),
            tx_type(),
            timestamp(),
            payload(512),
            any::<u64>(),
            transaction_hash(),
        )
            .prop_map(
                |(key_seed, rng_seed, tx_type, created_at, payload, receiver_seed, hash)| {
                    TransactionParams {
                        key_seed,
                        rng_seed,
                        tx_type,
                        created_at,
                        payload,
                        receiver_seed,
                        criticized_hash: hash,
                    }
                },
            )
            .boxed()
    }
}

impl TransactionParams {
    pub fn signing_key(&self) -> SigningKey {
        generate_signing_key(&mut StdRng::seed_from_u64(self.key_seed))
    }

    pub fn receiver(&self) -> PublicKey {
        public_key_of(&generate_signing_key(&mut StdRng::seed_from_u64(self.receiver_seed)))
    }
}

/// Build a transaction from parameters. The header is always consistent.
pub fn transaction_from_params(params: &TransactionParams) -> Transaction {
    let key = params.signing_key();
    let mut builder = TransactionBuilder::new(public_key_of(&key), params.tx_type)
        .payload(params.payload.clone())
        .created_at(params.created_at);

    if params.tx_type == TransactionType::Critique {
        builder = builder
            .receiver(params.receiver())
            .criticizes(params.criticized_hash.clone());
    }

    builder
        .sign_with_rng(&key, &mut StdRng::seed_from_u64(params.rng_seed))
        .expect("generated header is consistent")
}
