//! Profile persistence.
//!
//! One hidden JSON file in the home directory holds every account.
//! Writes are whole-file and last-writer-wins; there is no locking.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::UserDirs;

use super::ProfileBook;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const PROFILE_FILE: &str = ".logseek_profile";

/// Get the profile file path.
pub fn profile_path() -> Result<PathBuf> {
    let dirs = UserDirs::new().context("Could not determine home directory")?;
    Ok(dirs.home_dir().join(PROFILE_FILE))
}

/// Load the profile book; a missing file is an empty book, not an error.
pub fn load() -> Result<ProfileBook> {
    let path = profile_path()?;

    if !path.exists() {
        return Ok(ProfileBook::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read profile file")?;
    serde_json::from_str(&json).context("Invalid profile file")
}

/// Save the whole profile book.
pub fn save(book: &ProfileBook) -> Result<()> {
    let path = profile_path()?;
    let json = serde_json::to_string_pretty(book)?;

    fs::write(&path, &json).context("Failed to write profile file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Save, logging a warning instead of failing the command.
pub fn save_best_effort(book: &ProfileBook) {
    if let Err(e) = save(book) {
        tracing::warn!(error = %e, "Failed to save profile");
    }
}

/// Remove the profile file entirely.
pub fn clear() -> Result<()> {
    let path = profile_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove profile file")?;
    }

    Ok(())
}
