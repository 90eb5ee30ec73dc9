//! Ed25519 keypair derivation and presentation helpers.
//!
//! The 32-byte seed is the single source of truth: the public key and the
//! 64-byte expanded secret (seed followed by public key, as OpenSSH stores
//! it) are both derived from it deterministically. This determinism is what
//! makes mnemonic-based restore exact — the same words always rebuild the
//! same key.

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

pub mod fingerprint;
pub mod store;

/// Algorithm tag used in both the public key blob and the private payload.
pub const KEY_TYPE: &str = "ssh-ed25519";

/// Seed and public key sizes, fixed by the signature scheme.
pub const SEED_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 32;

/// An ed25519 keypair held as raw bytes.
///
/// The seed is zeroed on drop. Values are never mutated after construction;
/// every transformation builds a fresh `KeyPair`.
#[derive(Clone)]
pub struct KeyPair {
    public: [u8; PUBLIC_KEY_LEN],
    seed: Zeroizing<[u8; SEED_LEN]>,
}

impl KeyPair {
    /// Derive the full keypair from a 32-byte seed.
    ///
    /// Pure and deterministic: the standard ed25519 key generation (SHA-512
    /// expansion of the seed, clamped scalar, base-point multiplication).
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        KeyPair {
            public: signing_key.verifying_key().to_bytes(),
            seed: Zeroizing::new(*seed),
        }
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public
    }

    pub fn seed(&self) -> &[u8; SEED_LEN] {
        &self.seed
    }

    /// The 64-byte secret field of the wire format: seed followed by the
    /// public key, exactly as ed25519 key generation produces it.
    pub fn expanded_secret(&self) -> Zeroizing<[u8; 64]> {
        let mut expanded = Zeroizing::new([0u8; 64]);
        expanded[..SEED_LEN].copy_from_slice(&*self.seed);
        expanded[SEED_LEN..].copy_from_slice(&self.public);
        expanded
    }
}

/// The single-line public key form, `ssh-ed25519 <base64-blob> <comment>`,
/// as written to the `.pub` companion file. The comment is omitted when
/// empty; the line always ends with a newline.
pub fn public_key_line(keypair: &KeyPair, comment: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let blob = STANDARD.encode(crate::container::public_key_blob(keypair));
    if comment.is_empty() {
        format!("{KEY_TYPE} {blob}\n")
    } else {
        format!("{KEY_TYPE} {blob} {comment}\n")
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        *self.seed == *other.seed && self.public == other.public
    }
}

impl Eq for KeyPair {}

impl std::fmt::Debug for KeyPair {
    /// Never prints the seed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
