//! Integration tests: the full backup/restore chain over the public API.
//!
//! Covers:
//!   1. seed -> container -> armor -> parse -> words -> entropy -> same keypair
//!   2. the same chain through a passphrase-encrypted container
//!   3. the passphrase-retry boundary (parse without, then with, a passphrase)
//!   4. golden last-word value for the all-zero seed

use rand::rngs::StdRng;
use rand::SeedableRng;

use ssh_bip39::container;
use ssh_bip39::error::ContainerError;
use ssh_bip39::keys::{fingerprint::fingerprint, public_key_line, KeyPair};
use ssh_bip39::mnemonic;

/// Fixed keypair with seed [42u8; 32] — the key being backed up.
fn fixed_keypair() -> KeyPair {
    KeyPair::from_seed(&[42u8; 32])
}

#[test]
fn test_backup_restore_chain_without_passphrase() {
    let original = fixed_keypair();

    // Backup: build a key file, read it back, turn the seed into words.
    let bytes = container::build(&original, "laptop", None, &mut StdRng::seed_from_u64(1))
        .expect("build should succeed");
    let armored = container::encode_armor(&bytes);
    let reread = container::decode_armor(&armored).expect("armor should decode");
    let (parsed, comment) = container::parse(&reread, None).expect("parse should succeed");
    assert_eq!(comment, "laptop");
    let words = mnemonic::entropy_to_mnemonic(parsed.seed()).expect("encoding should succeed");

    // Restore: words back to entropy, entropy back to the identical keypair.
    let entropy = mnemonic::mnemonic_to_entropy(&words).expect("decoding should succeed");
    let restored = KeyPair::from_seed(&entropy);
    assert_eq!(restored, original, "restored keypair must be bit-identical to the original");
    assert_eq!(
        fingerprint(&restored),
        fingerprint(&original),
        "fingerprints must agree after a full round-trip"
    );

    // And the restored key serializes to a container that parses again.
    let rebuilt = container::build(&restored, "laptop", None, &mut StdRng::seed_from_u64(2))
        .expect("rebuild should succeed");
    let (reparsed, _) = container::parse(&rebuilt, None).expect("reparse should succeed");
    assert_eq!(reparsed, original);
}

#[test]
fn test_backup_restore_chain_with_passphrase() {
    let original = fixed_keypair();
    let bytes = container::build(
        &original,
        "work key",
        Some("correct horse battery staple"),
        &mut StdRng::seed_from_u64(3),
    )
    .expect("build should succeed");
    let armored = container::encode_armor(&bytes);

    let reread = container::decode_armor(&armored).expect("armor should decode");
    let (parsed, comment) = container::parse(&reread, Some("correct horse battery staple"))
        .expect("parse with the right passphrase should succeed");
    assert_eq!(comment, "work key");

    let words = mnemonic::entropy_to_mnemonic(parsed.seed()).expect("encoding should succeed");
    let entropy = mnemonic::mnemonic_to_entropy(&words).expect("decoding should succeed");
    assert_eq!(KeyPair::from_seed(&entropy), original);
}

#[test]
fn test_passphrase_retry_boundary() {
    // The caller's retry loop: first parse without a passphrase, observe
    // PassphraseRequired, then re-invoke with credentials. Each attempt is a
    // complete, independent call.
    let bytes = container::build(
        &fixed_keypair(),
        "",
        Some("sesame"),
        &mut StdRng::seed_from_u64(4),
    )
    .expect("build should succeed");

    assert_eq!(
        container::parse(&bytes, None).unwrap_err(),
        ContainerError::PassphraseRequired,
        "first attempt without a passphrase must ask for one"
    );
    assert_eq!(
        container::parse(&bytes, Some("wrong")).unwrap_err(),
        ContainerError::DecryptionFailed,
        "a wrong passphrase must fail terminally for the attempt"
    );
    container::parse(&bytes, Some("sesame")).expect("retry with the right passphrase must succeed");
}

#[test]
fn test_zero_seed_golden_words() {
    let keypair = KeyPair::from_seed(&[0u8; 32]);
    let words = mnemonic::entropy_to_mnemonic(keypair.seed()).expect("encoding should succeed");
    let words: Vec<&str> = words.split(' ').collect();
    assert_eq!(words.len(), 24);
    assert_eq!(words[23], "art", "the 24th word of the all-zero seed is fixed");
}

#[test]
fn test_public_key_line_matches_restored_key() {
    let original = fixed_keypair();
    let line = public_key_line(&original, "user@host");
    assert!(line.starts_with("ssh-ed25519 "));
    assert!(line.ends_with(" user@host\n"));

    // The same key restored from words produces the identical .pub line.
    let words = mnemonic::entropy_to_mnemonic(original.seed()).unwrap();
    let restored = KeyPair::from_seed(&mnemonic::mnemonic_to_entropy(&words).unwrap());
    assert_eq!(public_key_line(&restored, "user@host"), line);
}
