use std::path::Path;

use anyhow::Context;

use crate::cli::Cli;
use crate::commands::{confirm, prompt_line, prompt_new_passphrase};
use crate::container;
use crate::keys::fingerprint::fingerprint;
use crate::keys::{public_key_line, store, KeyPair};
use crate::mnemonic;

/// Rebuild a private key file from 24 seed words.
///
/// Prompts for the words, then (unless `-n`) for a passphrase and comment,
/// derives the keypair from the recovered entropy, and writes the armored
/// private key plus a `.pub` companion file.
pub fn run_restore(key_file: &Path, args: &Cli) -> anyhow::Result<()> {
    if key_file.exists() && !args.yes {
        let question = format!("{} already exists. Overwrite?", key_file.display());
        if !confirm(&question)? {
            anyhow::bail!("Operation cancelled");
        }
    }

    let words = prompt_line("24 seed words")?;
    if words.trim().is_empty() {
        println!("No words, exiting");
        return Ok(());
    }
    let entropy = mnemonic::mnemonic_to_entropy(&words)?;
    let keypair = KeyPair::from_seed(&entropy);

    let (passphrase, comment) = if args.no_pass {
        (None, String::new())
    } else {
        let passphrase = prompt_new_passphrase()?;
        let comment = prompt_line("Public key comment (optional)")?;
        (Some(passphrase), comment)
    };

    let bytes = container::build(
        &keypair,
        &comment,
        passphrase.as_deref().map(String::as_str),
        &mut rand::thread_rng(),
    )?;
    let armored = container::encode_armor(&bytes);

    store::write_private_key_atomic(&armored, key_file)
        .with_context(|| format!("Failed to write {}", key_file.display()))?;
    println!("Your private key has been saved in {}", key_file.display());

    let pub_file = store::public_key_path(key_file);
    std::fs::write(&pub_file, public_key_line(&keypair, &comment))
        .with_context(|| format!("Failed to write {}", pub_file.display()))?;
    println!("Your public key has been saved in {}", pub_file.display());

    println!("Fingerprint: {}", fingerprint(&keypair));
    Ok(())
}
