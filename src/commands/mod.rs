pub mod backup;
pub mod restore;

use std::io::{self, BufRead, IsTerminal, Write};

use zeroize::Zeroizing;

/// Read one line of input for `prompt`.
///
/// On a terminal this uses an interactive prompt; when stdin is piped the
/// prompt is skipped and a line is read directly, so the tool stays
/// scriptable.
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        let input = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| anyhow::anyhow!("prompt failed: {}", e))?;
        Ok(input)
    } else {
        read_stdin_line()
    }
}

/// Read a passphrase without echoing it. Piped stdin falls back to a plain
/// line read (used by tests and batch callers).
pub fn prompt_passphrase(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        let pass = dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| anyhow::anyhow!("passphrase prompt failed: {}", e))?;
        Ok(Zeroizing::new(pass))
    } else {
        Ok(Zeroizing::new(read_stdin_line()?))
    }
}

/// Like [`prompt_passphrase`] but asks twice and requires both entries to
/// match, for setting a new passphrase.
pub fn prompt_new_passphrase() -> anyhow::Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        let pass = dialoguer::Password::new()
            .with_prompt("Enter passphrase (empty for no passphrase)")
            .allow_empty_password(true)
            .with_confirmation("Enter same passphrase again", "Passphrases do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("passphrase prompt failed: {}", e))?;
        Ok(Zeroizing::new(pass))
    } else {
        let first = Zeroizing::new(read_stdin_line()?);
        let second = Zeroizing::new(read_stdin_line()?);
        if *first != *second {
            anyhow::bail!("Passphrases do not match");
        }
        Ok(first)
    }
}

/// Ask a yes/no question on stderr; only an initial 'y'/'Y' counts as yes.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    eprint!("{} (y/n) ", question);
    io::stderr().flush()?;
    let answer = read_stdin_line()?;
    Ok(answer.trim().to_ascii_uppercase().starts_with('Y'))
}

fn read_stdin_line() -> anyhow::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
