use thiserror::Error;

/// Failures of the entropy <-> word-sequence codec.
///
/// Every validation failure gets its own variant so the CLI can tell the user
/// exactly what is wrong (down to which word position was mistyped) without
/// the codec doing any user-facing formatting itself.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("entropy must be exactly 32 bytes, got {0}")]
    InvalidEntropyLength(usize),

    #[error("expected exactly 24 words, got {0}")]
    InvalidWordCount(usize),

    #[error("word {position} (\"{word}\") is not in the wordlist")]
    UnknownWord { word: String, position: usize },

    #[error("checksum mismatch — one or more words are wrong")]
    ChecksumMismatch,
}

/// Failures of the binary key-container codec.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// The container is encrypted and no passphrase was supplied. This is the
    /// one non-terminal outcome: the caller is expected to obtain a passphrase
    /// and re-invoke the parse.
    #[error("key is passphrase-protected")]
    PassphraseRequired,

    #[error("decryption failed: wrong passphrase or corrupted key data")]
    DecryptionFailed,

    #[error("unsupported key type \"{0}\", expected ssh-ed25519")]
    UnsupportedKeyType(String),

    #[error("malformed key container: {0}")]
    MalformedContainer(String),
}

impl ContainerError {
    /// Shorthand for the structural-inconsistency variant.
    pub fn malformed(detail: impl Into<String>) -> Self {
        ContainerError::MalformedContainer(detail.into())
    }
}
