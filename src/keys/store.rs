use std::path::{Path, PathBuf};

use anyhow::Context;

/// Write an armored private key to disk atomically (write to temp then
/// rename) and set 0600 permissions.
///
/// A temp file in the destination directory makes the replacement atomic on
/// POSIX systems. Permissions are set explicitly after the rename — the tool
/// owns this guarantee rather than relying on the process umask.
pub fn write_private_key_atomic(armored: &str, dest: &Path) -> anyhow::Result<()> {
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let tmp = parent.join(format!(
        ".{}.tmp",
        dest.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "key".to_string())
    ));

    std::fs::write(&tmp, armored)
        .with_context(|| format!("Failed to write temp file {}", tmp.display()))?;

    if let Err(e) = std::fs::rename(&tmp, dest) {
        // Attempt cleanup of temp file on rename failure
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to move key into place at {}", dest.display()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dest, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set 0600 permissions on {}", dest.display()))?;
    }

    Ok(())
}

/// Path of the `.pub` companion: the key file name with `.pub` appended.
pub fn public_key_path(key_file: &Path) -> PathBuf {
    let mut name = key_file.as_os_str().to_owned();
    name.push(".pub");
    PathBuf::from(name)
}
