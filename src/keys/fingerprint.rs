use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::container;
use crate::keys::KeyPair;

/// SHA-256 fingerprint of the public key blob, in the familiar
/// `SHA256:<base64>` presentation (no base64 padding).
pub fn fingerprint(keypair: &KeyPair) -> String {
    let blob = container::public_key_blob(keypair);
    let digest = Sha256::digest(&blob);
    format!("SHA256:{}", STANDARD_NO_PAD.encode(digest))
}
