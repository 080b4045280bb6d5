//! # Postchain Testkit
//!
//! Testing utilities for Postchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known hash chains and key strings for cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Seeded authors for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use postchain_testkit::vectors::{all_vectors, check_vector};
//!
//! for vector in all_vectors() {
//!     check_vector(&vector).unwrap();
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use postchain_testkit::generators::{transaction_from_params, TransactionParams};
//!
//! proptest! {
//!     #[test]
//!     fn transactions_verify(params: TransactionParams) {
//!         let tx = transaction_from_params(&params);
//!         prop_assert!(postchain_core::verify(&tx).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use postchain_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::with_seed(1);
//! let post = fixture.make_post(b"initial data");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fixed_time, multi_party_fixtures, TestFixture};
pub use generators::{transaction_from_params, TransactionParams};
pub use vectors::{all_vectors, key_vectors, verify_all_vectors, GoldenVector, KeyVector};
