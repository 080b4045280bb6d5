//! End-to-end scenarios through the public API.

use std::sync::Arc;
use std::thread;

use rand::rngs::OsRng;

use postchain::core::keys::{generate_signing_key, public_key_of};
use postchain::core::signature::SIGNATURE_STRING_LEN;
use postchain::core::validate_transaction_structure;
use postchain::{
    canonical_bytes, check, decode_transaction, verify, Author, AuthorConfig, CoreError, Error,
    Transaction, TransactionType,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[test]
fn hello_world_post() {
    init_tracing();
    let key = generate_signing_key(&mut OsRng);
    let public = public_key_of(&key);

    let tx = Transaction::build(
        &key,
        &public,
        &public,
        "Hello World",
        TransactionType::Post,
        "",
    )
    .unwrap();

    assert_eq!(tx.header.to, "");
    assert_eq!(tx.post_hash.len(), 128);
    assert!(is_lower_hex(&tx.post_hash));
    assert_eq!(tx.transaction_hash.len(), 56);
    assert!(is_lower_hex(&tx.transaction_hash));
    assert_eq!(tx.signature.len(), SIGNATURE_STRING_LEN);
    assert!(verify(&tx).unwrap());
}

#[test]
fn header_invariant_enforced() {
    let key = generate_signing_key(&mut OsRng);
    let public = public_key_of(&key);

    let post_with_target =
        Transaction::build(&key, &public, &public, "x", TransactionType::Post, "nonempty");
    assert!(matches!(post_with_target, Err(CoreError::InvalidHeader(_))));

    let critique_without_target =
        Transaction::build(&key, &public, &public, "x", TransactionType::Critique, "");
    assert!(matches!(critique_without_target, Err(CoreError::InvalidHeader(_))));
}

#[test]
fn thread_of_critiques() {
    init_tracing();
    let mut alice = Author::generate(AuthorConfig::default());
    let mut bob = Author::generate(AuthorConfig::default());
    let mut carol = Author::generate(AuthorConfig::default());

    let root = alice.post("The earth is round").unwrap();
    let c1 = bob.critique(&root, "Citation needed").unwrap();
    let c2 = carol.critique(&c1, "Eratosthenes, 240 BC").unwrap();

    for tx in [&root, &c1, &c2] {
        assert!(check(tx).unwrap());
        assert!(validate_transaction_structure(tx).is_ok());
    }
    assert_eq!(c1.header.to, alice.key_string());
    assert_eq!(c2.header.to, bob.key_string());
    assert_eq!(c2.header.criticized_hash, c1.transaction_hash);
}

#[test]
fn wire_roundtrip_still_verifies() {
    let mut alice = Author::generate(AuthorConfig::default());
    let mut bob = Author::generate(AuthorConfig::default());
    let root = alice.post(vec![0u8, 1, 2, 255]).unwrap();
    let critique = bob.critique(&root, "binary?").unwrap();

    for tx in [root, critique] {
        let decoded = decode_transaction(&canonical_bytes(&tx)).unwrap();
        assert_eq!(decoded, tx);
        assert!(verify(&decoded).unwrap());
    }
}

#[test]
fn json_roundtrip_still_verifies() {
    let mut alice = Author::generate(AuthorConfig::default());
    let tx = alice.post("json").unwrap();

    let json = serde_json::to_string(&tx).unwrap();
    let decoded: Transaction = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, tx);
    assert!(verify(&decoded).unwrap());
}

#[test]
fn malformed_fields_are_errors_not_false() {
    init_tracing();
    let mut alice = Author::generate(AuthorConfig::default());
    let tx = alice.post("x").unwrap();

    let mut bad_sig = tx.clone();
    bad_sig.signature = "0102".into();
    assert!(matches!(
        check(&bad_sig),
        Err(Error::Core(CoreError::MalformedSignature(_)))
    ));

    let mut bad_key = tx;
    bad_key.header.from = "00".repeat(10);
    assert!(matches!(verify(&bad_key), Err(CoreError::MalformedKey(_))));
}

#[test]
fn concurrent_verification() {
    let mut alice = Author::generate(AuthorConfig::default());
    let txs: Arc<Vec<Transaction>> =
        Arc::new((0..8).map(|i| alice.post(format!("post {i}")).unwrap()).collect());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let txs = Arc::clone(&txs);
            thread::spawn(move || txs.iter().all(|tx| verify(tx).unwrap()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn concurrent_building() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let mut author = Author::generate(AuthorConfig::default());
                author.post(format!("from thread {i}")).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(verify(&handle.join().unwrap()).unwrap());
    }
}
