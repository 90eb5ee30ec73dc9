mod cli;
mod commands;
mod container;
mod crypto;
mod error;
mod keys;
mod mnemonic;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = if cli.restore {
        commands::restore::run_restore(&cli.key_file, &cli)
    } else {
        commands::backup::run_backup(&cli.key_file)
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
