//! Crypto module: passphrase-based key derivation and payload encryption for
//! the key container.
//!
//! The container's `bcrypt` KDF stretches the passphrase and salt into 48
//! bytes — a 32-byte AES-256 key followed by a 16-byte IV — and the private
//! payload is encrypted with AES-256 in CTR mode, so ciphertext and
//! plaintext lengths are identical. Key boundaries are raw byte arrays;
//! derived material is zeroed on drop.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use zeroize::Zeroizing;

use crate::error::ContainerError;

type Aes256Ctr = Ctr128BE<Aes256>;

/// AES-256 key size.
pub const CIPHER_KEY_LEN: usize = 32;

/// AES block / CTR IV size. Encrypted payloads are padded to this boundary.
pub const CIPHER_BLOCK_LEN: usize = 16;

/// Total KDF output: cipher key followed by IV.
pub const DERIVED_LEN: usize = CIPHER_KEY_LEN + CIPHER_BLOCK_LEN;

/// Stretch a passphrase and salt into cipher key material.
///
/// Deterministic: the same passphrase, salt, and rounds always produce the
/// same 48 bytes. Rounds and salt travel inside the container, so a parser
/// re-derives with whatever parameters the file declares.
pub fn derive_cipher_material(
    passphrase: &str,
    salt: &[u8],
    rounds: u32,
) -> Result<Zeroizing<[u8; DERIVED_LEN]>, ContainerError> {
    let mut derived = Zeroizing::new([0u8; DERIVED_LEN]);
    bcrypt_pbkdf::bcrypt_pbkdf(passphrase, salt, rounds, &mut *derived)
        .map_err(|_| ContainerError::malformed("invalid KDF parameters"))?;
    Ok(derived)
}

/// Encrypt or decrypt `data` in place with AES-256-CTR.
///
/// CTR is an involution: applying the keystream twice restores the input.
pub fn apply_cipher(material: &[u8; DERIVED_LEN], data: &mut [u8]) {
    let (key, iv) = material.split_at(CIPHER_KEY_LEN);
    let mut cipher = Aes256Ctr::new_from_slices(key, iv).expect("key and IV lengths are fixed");
    cipher.apply_keystream(data);
}
