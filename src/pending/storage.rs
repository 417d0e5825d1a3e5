//! Persistence of the pending integration in `<git-dir>/fwdport/`.

use super::{PENDING_VERSION, PendingIntegration};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for fwdport state within the git directory.
const STATE_DIR: &str = "fwdport";

/// Filename for the pending integration.
const PENDING_FILE: &str = "pending.toml";

/// Get path to the fwdport state directory.
pub fn state_dir(git_dir: &Path) -> PathBuf {
    git_dir.join(STATE_DIR)
}

/// Get path to the pending integration file.
pub fn pending_path(git_dir: &Path) -> PathBuf {
    state_dir(git_dir).join(PENDING_FILE)
}

/// Load the pending integration, if one was saved.
pub fn load_pending(git_dir: &Path) -> Result<Option<PendingIntegration>> {
    let path = pending_path(git_dir);

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Pending(format!("failed to read {}: {e}", path.display())))?;

    let pending: PendingIntegration = toml::from_str(&content)
        .map_err(|e| Error::Pending(format!("failed to parse {}: {e}", path.display())))?;

    if pending.version > PENDING_VERSION {
        return Err(Error::Pending(format!(
            "{} was written by a newer fwdport (version {})",
            path.display(),
            pending.version
        )));
    }

    Ok(Some(pending))
}

/// Save the pending integration.
///
/// Creates the `<git-dir>/fwdport/` directory if it doesn't exist.
pub fn save_pending(git_dir: &Path, pending: &PendingIntegration) -> Result<()> {
    let dir = state_dir(git_dir);
    let path = dir.join(PENDING_FILE);

    if !dir.exists() {
        fs::create_dir_all(&dir)
            .map_err(|e| Error::Pending(format!("failed to create {}: {e}", dir.display())))?;
    }

    let mut to_save = pending.clone();
    to_save.version = PENDING_VERSION;

    let content = toml::to_string_pretty(&to_save)
        .map_err(|e| Error::Pending(format!("failed to serialize pending integration: {e}")))?;

    let content_with_header = format!(
        "# fwdport pending integration\n# Finalize with 'fwdport continue' once conflicts are resolved\n\n{content}"
    );

    fs::write(&path, content_with_header)
        .map_err(|e| Error::Pending(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}

/// Remove the pending integration. Missing files are fine.
pub fn clear_pending(git_dir: &Path) -> Result<()> {
    let path = pending_path(git_dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Pending(format!(
            "failed to remove {}: {e}",
            path.display()
        ))),
    }
}
