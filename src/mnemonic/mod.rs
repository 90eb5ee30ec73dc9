//! Mnemonic codec: 32-byte entropy <-> 24 English seed words.
//!
//! The encoding appends an 8-bit checksum (the first byte of
//! SHA-256(entropy)) to the 256 entropy bits and splits the resulting
//! 264-bit stream into 24 groups of 11 bits, each indexing the fixed
//! 2048-word list. Word order is significant: it carries both the entropy
//! and the checksum position. Both directions are pure functions with no
//! side effects.

use sha2::{Digest, Sha256};

use crate::error::MnemonicError;

mod wordlist;
pub use wordlist::WORDLIST;

/// Entropy size in bytes. Fixed — this codec only handles the 256-bit case,
/// which matches the ed25519 seed exactly.
pub const ENTROPY_LEN: usize = 32;

/// Words per mnemonic: (256 entropy bits + 8 checksum bits) / 11.
pub const WORD_COUNT: usize = 24;

const BITS_PER_WORD: usize = 11;
const CHECKSUM_BITS: usize = 8;
const TOTAL_BITS: usize = ENTROPY_LEN * 8 + CHECKSUM_BITS;

/// Encode 32 bytes of entropy as 24 space-separated words.
///
/// Deterministic: the same entropy always yields the same sentence.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String, MnemonicError> {
    if entropy.len() != ENTROPY_LEN {
        return Err(MnemonicError::InvalidEntropyLength(entropy.len()));
    }

    let checksum = Sha256::digest(entropy)[0];

    // Entropy bits followed by the 8 checksum bits, MSB first throughout.
    let mut bits = Vec::with_capacity(TOTAL_BITS);
    for &byte in entropy.iter().chain(std::iter::once(&checksum)) {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }

    let words: Vec<&str> = bits
        .chunks(BITS_PER_WORD)
        .map(|group| {
            let index = group.iter().fold(0usize, |acc, &bit| (acc << 1) | bit as usize);
            WORDLIST[index]
        })
        .collect();

    Ok(words.join(" "))
}

/// Decode a 24-word sentence back to the original 32 bytes of entropy.
///
/// Words are matched case-sensitively against the wordlist. The recomputed
/// checksum must agree with the 8 bits extracted from the final word, so a
/// typo or swapped word surfaces as an error rather than wrong entropy.
pub fn mnemonic_to_entropy(phrase: &str) -> Result<[u8; ENTROPY_LEN], MnemonicError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != WORD_COUNT {
        return Err(MnemonicError::InvalidWordCount(words.len()));
    }

    let mut bits = Vec::with_capacity(TOTAL_BITS);
    for (position, word) in words.iter().enumerate() {
        let index = WORDLIST
            .binary_search(word)
            .map_err(|_| MnemonicError::UnknownWord {
                word: (*word).to_string(),
                position,
            })?;
        for shift in (0..BITS_PER_WORD).rev() {
            bits.push((index >> shift) & 1 == 1);
        }
    }
    debug_assert_eq!(bits.len(), TOTAL_BITS);

    let mut entropy = [0u8; ENTROPY_LEN];
    for (i, group) in bits[..ENTROPY_LEN * 8].chunks(8).enumerate() {
        entropy[i] = group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8);
    }
    let checksum = bits[ENTROPY_LEN * 8..]
        .iter()
        .fold(0u8, |acc, &bit| (acc << 1) | bit as u8);

    if checksum != Sha256::digest(entropy)[0] {
        return Err(MnemonicError::ChecksumMismatch);
    }

    Ok(entropy)
}
