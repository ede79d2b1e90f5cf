//! Persisted session identity.
//!
//! The signed-in username survives between CLI invocations in a small TOML
//! file under the data dir, standing in for a browser session store. Login
//! writes it, logout removes it; there is no expiry.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::xdg_data_dir;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    username: String,
}

fn session_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("session.toml"))
}

/// The persisted signed-in username, if any.
pub fn load() -> anyhow::Result<Option<String>> {
    let path = session_path()?;
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Failed to read session file {}: {}",
                path.display(),
                e
            ))
        }
    };
    let session: SessionFile = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse session file {}: {}", path.display(), e))?;
    Ok(Some(session.username))
}

/// Persist the signed-in username.
pub fn store(username: &str) -> anyhow::Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create session directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents = toml::to_string(&SessionFile {
        username: username.to_string(),
    })
    .map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(&path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write session file {}: {}", path.display(), e))?;
    Ok(())
}

/// Remove the persisted identity. Succeeds if none was stored.
pub fn clear() -> anyhow::Result<()> {
    let path = session_path()?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to remove session file {}: {}",
            path.display(),
            e
        )),
    }
}
