//! Key container codec: the self-describing binary format that persists an
//! ed25519 keypair, optionally encrypted under a passphrase-derived key.
//!
//! Binary layout (big-endian length prefixes throughout):
//!
//! ```text
//! magic              b"openssh-key-v1\0"
//! cipher-name        string  ("none" | "aes256-ctr")
//! kdf-name           string  ("none" | "bcrypt")
//! kdf-options        string  (empty, or: salt string + rounds u32)
//! number-of-keys     u32     (always 1)
//! public-key-blob    string  (type tag string + public key string)
//! private-payload    string  (plaintext or ciphertext, see below)
//! ```
//!
//! Private payload, after decryption:
//!
//! ```text
//! check-int          u32, stored twice — both copies must match
//! type tag           string
//! public key         string (32 bytes)
//! secret key         string (64 bytes: seed then public key)
//! comment            string (UTF-8)
//! padding            bytes 1, 2, 3, ... up to the cipher block boundary
//! ```
//!
//! Parsing and building are pure transformations over in-memory buffers.
//! The randomness a build needs (check integer, KDF salt) comes from a
//! caller-supplied rng so tests can make construction deterministic.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::crypto;
use crate::error::ContainerError;
use crate::keys::{KeyPair, KEY_TYPE, PUBLIC_KEY_LEN, SEED_LEN};

mod wire;
pub use wire::{Reader, Writer};

mod armor;
pub use armor::{decode_armor, encode_armor};

/// Fixed preamble identifying the container format.
pub const MAGIC: &[u8] = b"openssh-key-v1\0";

const CIPHER_NONE: &str = "none";
const CIPHER_AES256_CTR: &str = "aes256-ctr";
const KDF_NONE: &str = "none";
const KDF_BCRYPT: &str = "bcrypt";

/// KDF work factor written into new containers. Parsing honors whatever
/// rounds count the container itself declares.
const KDF_ROUNDS: u32 = 16;
const KDF_SALT_LEN: usize = 16;

/// Plaintext payloads are padded to this boundary; encrypted payloads use
/// the cipher block size instead.
const PLAINTEXT_ALIGN: usize = 8;

const EXPANDED_SECRET_LEN: usize = 64;

/// Serialize a keypair into container bytes.
///
/// An empty (or absent) passphrase produces an unencrypted container with
/// cipher and KDF names of `"none"`. A non-empty passphrase produces an
/// encrypted one: a fresh random salt, `KDF_ROUNDS` rounds of the KDF, and
/// the private payload encrypted under the derived key.
pub fn build(
    keypair: &KeyPair,
    comment: &str,
    passphrase: Option<&str>,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Vec<u8>, ContainerError> {
    let passphrase = passphrase.filter(|p| !p.is_empty());
    let align = if passphrase.is_some() {
        crypto::CIPHER_BLOCK_LEN
    } else {
        PLAINTEXT_ALIGN
    };

    // Private payload: duplicated check integer, key fields, comment, then
    // incrementing padding out to the block boundary.
    let check = rng.next_u32();
    let mut payload = Writer::new();
    payload.write_u32(check);
    payload.write_u32(check);
    payload.write_str(KEY_TYPE);
    payload.write_string(keypair.public_key());
    payload.write_string(&*keypair.expanded_secret());
    payload.write_str(comment);
    let mut payload = Zeroizing::new(payload.into_bytes());
    let mut pad = 1u8;
    while payload.len() % align != 0 {
        payload.push(pad);
        pad = pad.wrapping_add(1);
    }

    let mut out = Writer::new();
    out.write_raw(MAGIC);
    match passphrase {
        None => {
            out.write_str(CIPHER_NONE);
            out.write_str(KDF_NONE);
            out.write_string(b"");
        }
        Some(passphrase) => {
            let mut salt = [0u8; KDF_SALT_LEN];
            rng.fill_bytes(&mut salt);
            let material = crypto::derive_cipher_material(passphrase, &salt, KDF_ROUNDS)?;
            crypto::apply_cipher(&material, payload.as_mut_slice());

            out.write_str(CIPHER_AES256_CTR);
            out.write_str(KDF_BCRYPT);
            let mut kdf_options = Writer::new();
            kdf_options.write_string(&salt);
            kdf_options.write_u32(KDF_ROUNDS);
            out.write_string(&kdf_options.into_bytes());
        }
    }
    out.write_u32(1);
    out.write_string(&public_key_blob(keypair));
    out.write_string(&payload);

    Ok(out.into_bytes())
}

/// Parse container bytes back into the keypair and comment.
///
/// If the container is encrypted and no (or an empty) passphrase is given,
/// this fails with [`ContainerError::PassphraseRequired`] so the caller can
/// prompt and retry; every other failure is terminal for the attempt.
pub fn parse(bytes: &[u8], passphrase: Option<&str>) -> Result<(KeyPair, String), ContainerError> {
    let mut reader = Reader::new(bytes);
    if reader.read_bytes(MAGIC.len())? != MAGIC {
        return Err(ContainerError::malformed("bad magic preamble"));
    }

    let cipher_name = reader.read_str()?.to_string();
    let kdf_name = reader.read_str()?.to_string();
    let kdf_options = reader.read_string()?;
    let key_count = reader.read_u32()?;
    if key_count != 1 {
        return Err(ContainerError::malformed(format!(
            "expected exactly 1 key, found {key_count}"
        )));
    }
    let public_blob = reader.read_string()?;
    let private_payload = reader.read_string()?;
    if !reader.is_empty() {
        return Err(ContainerError::malformed("trailing data after private payload"));
    }

    // The public blob carries its own type tag; reject foreign algorithms
    // before touching the private half.
    let mut pub_reader = Reader::new(public_blob);
    let pub_type = pub_reader.read_str()?;
    if pub_type != KEY_TYPE {
        return Err(ContainerError::UnsupportedKeyType(pub_type.to_string()));
    }
    let outer_public = pub_reader.read_string()?;
    if outer_public.len() != PUBLIC_KEY_LEN || !pub_reader.is_empty() {
        return Err(ContainerError::malformed("bad public key blob"));
    }

    let encrypted = match (cipher_name.as_str(), kdf_name.as_str()) {
        (CIPHER_NONE, KDF_NONE) => {
            if !kdf_options.is_empty() {
                return Err(ContainerError::malformed("unexpected KDF options on plaintext key"));
            }
            false
        }
        (CIPHER_AES256_CTR, KDF_BCRYPT) => true,
        (cipher, kdf) => {
            return Err(ContainerError::malformed(format!(
                "unsupported cipher/KDF combination {cipher}/{kdf}"
            )));
        }
    };

    let mut payload = Zeroizing::new(private_payload.to_vec());
    if encrypted {
        let passphrase = match passphrase {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ContainerError::PassphraseRequired),
        };
        if payload.is_empty() || payload.len() % crypto::CIPHER_BLOCK_LEN != 0 {
            return Err(ContainerError::malformed("ciphertext is not block-aligned"));
        }
        let mut opt_reader = Reader::new(kdf_options);
        let salt = opt_reader.read_string()?;
        let rounds = opt_reader.read_u32()?;
        if !opt_reader.is_empty() {
            return Err(ContainerError::malformed("trailing data in KDF options"));
        }
        let material = crypto::derive_cipher_material(passphrase, salt, rounds)?;
        crypto::apply_cipher(&material, payload.as_mut_slice());
    }

    parse_private_payload(&payload, outer_public, encrypted)
}

/// Decode the (decrypted or plaintext) private payload.
///
/// A check-integer mismatch on an encrypted payload means the wrong
/// passphrase or corrupted ciphertext; on a plaintext payload the same
/// mismatch can only be file corruption.
fn parse_private_payload(
    payload: &[u8],
    outer_public: &[u8],
    encrypted: bool,
) -> Result<(KeyPair, String), ContainerError> {
    let mut reader = Reader::new(payload);

    let integrity_error = || {
        if encrypted {
            ContainerError::DecryptionFailed
        } else {
            ContainerError::malformed("check integers disagree")
        }
    };
    // Under a wrong passphrase every subsequent read sees keystream garbage,
    // so length errors here are reported the same way as a check mismatch.
    let read_error = |e: ContainerError| if encrypted { ContainerError::DecryptionFailed } else { e };

    let check_a = reader.read_u32().map_err(read_error)?;
    let check_b = reader.read_u32().map_err(read_error)?;
    if check_a != check_b {
        return Err(integrity_error());
    }

    let key_type = reader.read_str().map_err(read_error)?;
    if key_type != KEY_TYPE {
        return Err(if encrypted {
            ContainerError::DecryptionFailed
        } else {
            ContainerError::UnsupportedKeyType(key_type.to_string())
        });
    }

    let public = reader.read_string().map_err(read_error)?;
    let secret = reader.read_string().map_err(read_error)?;
    let comment = reader.read_str().map_err(read_error)?.to_string();
    if public.len() != PUBLIC_KEY_LEN || secret.len() != EXPANDED_SECRET_LEN {
        return Err(ContainerError::malformed("bad key field length"));
    }

    for (i, &byte) in reader.read_rest().iter().enumerate() {
        if byte != (i as u8).wrapping_add(1) {
            return Err(if encrypted {
                ContainerError::DecryptionFailed
            } else {
                ContainerError::malformed("bad payload padding")
            });
        }
    }

    // Cross-checks: the private payload must agree with the outer public
    // blob, the secret's embedded public half, and the seed itself.
    if public != outer_public {
        return Err(ContainerError::malformed("public key mismatch between header and payload"));
    }
    if &secret[SEED_LEN..] != public {
        return Err(ContainerError::malformed("secret key does not embed the public key"));
    }
    let seed: [u8; SEED_LEN] = secret[..SEED_LEN]
        .try_into()
        .expect("length checked above");
    let keypair = KeyPair::from_seed(&seed);
    if keypair.public_key() != public {
        return Err(ContainerError::malformed("public key does not match the secret seed"));
    }

    Ok((keypair, comment))
}

/// The wire-format public key blob: type tag + raw public key, both
/// length-prefixed. Shared by the container header, the fingerprint, and
/// the `.pub` line.
pub fn public_key_blob(keypair: &KeyPair) -> Vec<u8> {
    let mut blob = Writer::new();
    blob.write_str(KEY_TYPE);
    blob.write_string(keypair.public_key());
    blob.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_keypair() -> KeyPair {
        KeyPair::from_seed(&[42u8; 32])
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_plaintext_round_trip() {
        let keypair = fixed_keypair();
        let bytes = build(&keypair, "user@host", None, &mut rng()).expect("build should succeed");
        let (parsed, comment) = parse(&bytes, None).expect("parse should succeed");
        assert_eq!(parsed, keypair, "round-tripped keypair must match the original");
        assert_eq!(comment, "user@host");
    }

    #[test]
    fn test_empty_passphrase_means_unencrypted() {
        let keypair = fixed_keypair();
        let a = build(&keypair, "c", None, &mut rng()).unwrap();
        let b = build(&keypair, "c", Some(""), &mut rng()).unwrap();
        assert_eq!(a, b, "empty passphrase must build the same plaintext container as none");
        // And it parses without any passphrase.
        parse(&b, None).expect("plaintext container must parse without a passphrase");
    }

    #[test]
    fn test_encrypted_round_trip() {
        let keypair = fixed_keypair();
        let bytes =
            build(&keypair, "work laptop", Some("hunter2"), &mut rng()).expect("build should succeed");
        let (parsed, comment) =
            parse(&bytes, Some("hunter2")).expect("parse with the right passphrase should succeed");
        assert_eq!(parsed, keypair);
        assert_eq!(comment, "work laptop");
    }

    #[test]
    fn test_encrypted_requires_passphrase() {
        let bytes = build(&fixed_keypair(), "", Some("hunter2"), &mut rng()).unwrap();
        assert_eq!(parse(&bytes, None), Err(ContainerError::PassphraseRequired));
        assert_eq!(parse(&bytes, Some("")), Err(ContainerError::PassphraseRequired));
    }

    #[test]
    fn test_wrong_passphrase_fails_decryption() {
        let bytes = build(&fixed_keypair(), "", Some("hunter2"), &mut rng()).unwrap();
        assert_eq!(
            parse(&bytes, Some("hunter3")),
            Err(ContainerError::DecryptionFailed),
            "a wrong passphrase must fail, never yield a plausible key"
        );
    }

    #[test]
    fn test_unicode_comment_round_trip() {
        let keypair = fixed_keypair();
        let bytes = build(&keypair, "clé de café ☕", None, &mut rng()).unwrap();
        let (_, comment) = parse(&bytes, None).unwrap();
        assert_eq!(comment, "clé de café ☕");
    }

    #[test]
    fn test_build_is_deterministic_under_a_seeded_rng() {
        let keypair = fixed_keypair();
        let a = build(&keypair, "c", Some("p"), &mut rng()).unwrap();
        let b = build(&keypair, "c", Some("p"), &mut rng()).unwrap();
        assert_eq!(a, b, "identical rng streams must build identical containers");

        let c = build(&keypair, "c", Some("p"), &mut StdRng::seed_from_u64(8)).unwrap();
        assert_ne!(a, c, "a different salt/check integer must change the container");
    }

    #[test]
    fn test_truncation_at_every_length_fails_cleanly() {
        let bytes = build(&fixed_keypair(), "comment", None, &mut rng()).unwrap();
        for len in 0..bytes.len() {
            let result = parse(&bytes[..len], None);
            assert!(
                result.is_err(),
                "truncation to {} of {} bytes must be rejected",
                len,
                bytes.len()
            );
        }
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut bytes = build(&fixed_keypair(), "", None, &mut rng()).unwrap();
        bytes[0] ^= 0x20;
        assert!(matches!(
            parse(&bytes, None),
            Err(ContainerError::MalformedContainer(_))
        ));
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let mut bytes = build(&fixed_keypair(), "", None, &mut rng()).unwrap();
        bytes.push(0);
        assert!(matches!(
            parse(&bytes, None),
            Err(ContainerError::MalformedContainer(_))
        ));
    }

    #[test]
    fn test_foreign_key_type_is_rejected() {
        // Hand-assemble a container whose public blob claims a different
        // algorithm; it must be refused before the private half is touched.
        let mut out = Writer::new();
        out.write_raw(MAGIC);
        out.write_str("none");
        out.write_str("none");
        out.write_string(b"");
        out.write_u32(1);
        let mut blob = Writer::new();
        blob.write_str("ssh-rsa");
        blob.write_string(&[0u8; 32]);
        out.write_string(&blob.into_bytes());
        out.write_string(b"");
        assert_eq!(
            parse(&out.into_bytes(), None),
            Err(ContainerError::UnsupportedKeyType("ssh-rsa".to_string()))
        );
    }

    #[test]
    fn test_multiple_keys_are_rejected() {
        let bytes = build(&fixed_keypair(), "", None, &mut rng()).unwrap();
        // number-of-keys lives right after the three header strings:
        // magic(15) + "none"(8) + "none"(8) + empty options(4).
        let offset = MAGIC.len() + 8 + 8 + 4;
        let mut tampered = bytes.clone();
        tampered[offset + 3] = 2;
        assert!(matches!(
            parse(&tampered, None),
            Err(ContainerError::MalformedContainer(_))
        ));
    }

    #[test]
    fn test_corrupted_checkint_is_detected() {
        let keypair = fixed_keypair();
        let bytes = build(&keypair, "", None, &mut rng()).unwrap();
        // The first check integer is the first payload byte; its offset is
        // everything up to and including the private payload length prefix.
        let payload_offset = bytes.len()
            - parse_payload_len(&bytes);
        let mut tampered = bytes.clone();
        tampered[payload_offset] ^= 0xff;
        assert!(matches!(
            parse(&tampered, None),
            Err(ContainerError::MalformedContainer(_))
        ));
    }

    #[test]
    fn test_corrupted_ciphertext_fails_decryption() {
        let bytes = build(&fixed_keypair(), "", Some("hunter2"), &mut rng()).unwrap();
        let mut tampered = bytes.clone();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;
        let result = parse(&tampered, Some("hunter2"));
        assert!(
            matches!(
                result,
                Err(ContainerError::DecryptionFailed) | Err(ContainerError::MalformedContainer(_))
            ),
            "corrupted ciphertext must surface an error, got: {:?}",
            result
        );
    }

    /// Length of the private payload (including nothing else), read off the
    /// final length prefix of a well-formed container.
    fn parse_payload_len(bytes: &[u8]) -> usize {
        let mut r = Reader::new(bytes);
        r.read_bytes(MAGIC.len()).unwrap();
        r.read_str().unwrap();
        r.read_str().unwrap();
        r.read_string().unwrap();
        r.read_u32().unwrap();
        r.read_string().unwrap();
        r.read_string().unwrap().len()
    }
}
