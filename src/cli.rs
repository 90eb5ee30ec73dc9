use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ssh-bip39",
    version,
    about = "Backup or restore an ed25519 SSH key as 24 English seed words"
)]
pub struct Cli {
    /// Path of the private key file to back up (or to write when restoring)
    #[arg(value_name = "KEY_FILE")]
    pub key_file: PathBuf,

    /// Restore a key from seed words instead of printing them
    #[arg(long, short = 'r')]
    pub restore: bool,

    /// Skip the passphrase and comment prompts when restoring
    #[arg(long = "no-pass", short = 'n', requires = "restore")]
    pub no_pass: bool,

    /// Overwrite an existing key file without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}
