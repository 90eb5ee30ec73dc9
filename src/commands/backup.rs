use std::path::Path;

use anyhow::Context;

use crate::commands::prompt_passphrase;
use crate::container;
use crate::error::ContainerError;
use crate::keys::fingerprint::fingerprint;
use crate::keys::KeyPair;
use crate::mnemonic;

/// Read an armored private key file and print its 24 seed words.
///
/// An encrypted key is first parsed without a passphrase; the resulting
/// `PassphraseRequired` triggers a single prompt-and-retry. A wrong
/// passphrase after that is terminal.
pub fn run_backup(key_file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(key_file)
        .with_context(|| format!("Failed to read {}", key_file.display()))?;
    let bytes = container::decode_armor(&text)?;

    let (keypair, _comment) = match container::parse(&bytes, None) {
        Ok(parsed) => parsed,
        Err(ContainerError::PassphraseRequired) => {
            let passphrase = prompt_passphrase("Enter passphrase")?;
            container::parse(&bytes, Some(passphrase.as_str()))?
        }
        Err(e) => return Err(e.into()),
    };

    println!("Fingerprint: {}", fingerprint(&keypair));
    print_words(&keypair)?;
    Ok(())
}

fn print_words(keypair: &KeyPair) -> anyhow::Result<()> {
    let words = mnemonic::entropy_to_mnemonic(keypair.seed())?;
    println!("Words: {}", words);
    Ok(())
}
