use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::error::RegistryError;

/// Platform file browser command.
pub fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Create `base/folder` if needed and open it with `opener`.
///
/// The opener process is not awaited.
pub async fn open_folder(base: &Path, folder: &str, opener: &str) -> Result<PathBuf, RegistryError> {
    let dir = base.join(folder);
    tokio::fs::create_dir_all(&dir).await?;

    Command::new(opener)
        .arg(&dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| RegistryError::Opener(format!("Failed to spawn {opener}: {e}")))?;

    info!(dir = %dir.display(), opener, "Opened folder");
    Ok(dir)
}
