//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use postchain::{Author, AuthorConfig};
use postchain_core::keys::generate_signing_key;
use postchain_core::{PublicKey, SigningKey, Timestamp, Transaction, TransactionBuilder, TransactionType};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 2023-11-14T22:13:20.123456789Z
pub const FIXED_TIME_NANOS: i64 = 1_700_000_000_123_456_789;

/// A fixed creation time for reproducible transactions.
pub fn fixed_time() -> Timestamp {
    Timestamp::from_unix_nanos(FIXED_TIME_NANOS)
}

/// A test fixture with a deterministic signing key and author.
pub struct TestFixture {
    pub signing_key: SigningKey,
    pub author: Author<StdRng>,
    seed: u64,
}

impl TestFixture {
    /// Create a new test fixture with a random seed.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create with a deterministic key and signing RNG from seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let signing_key = generate_signing_key(&mut rng);
        let author = Author::with_rng(signing_key.clone(), rng, AuthorConfig::default());
        Self {
            signing_key,
            author,
            seed,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        *self.author.public_key()
    }

    pub fn key_string(&self) -> &str {
        self.author.key_string()
    }

    /// Create a post stamped with the current time.
    pub fn make_post(&mut self, payload: &[u8]) -> Transaction {
        self.author
            .post(payload.to_vec())
            .expect("fixture post should build")
    }

    /// Create a critique of `target` stamped with the current time.
    pub fn make_critique(&mut self, target: &Transaction, payload: &[u8]) -> Transaction {
        self.author
            .critique(target, payload.to_vec())
            .expect("fixture critique should build")
    }

    /// Create a post at [`fixed_time`], fully reproducible from the seed.
    pub fn make_fixed_post(&self, payload: &[u8]) -> Transaction {
        TransactionBuilder::new(self.public_key(), TransactionType::Post)
            .payload(payload.to_vec())
            .created_at(fixed_time())
            .sign_with_rng(&self.signing_key, &mut StdRng::seed_from_u64(self.seed))
            .expect("fixture post should build")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count as u64).map(TestFixture::with_seed).collect()
}
