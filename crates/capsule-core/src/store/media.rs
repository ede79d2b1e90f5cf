//! Media blob storage.
//!
//! Uploaded files land under `<root>/<username>/` with the entry's display
//! stamp baked into the filename, and entries reference them by path. Blobs
//! are plain files, not content-addressed; moving the root breaks the
//! references recorded in the journal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CapsuleError, Result};
use crate::store::types::MediaUpload;

/// File extensions accepted for media uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "mp4"];

/// Writes uploaded media blobs under a per-user directory tree.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check an uploaded filename against the extension allow-list.
    ///
    /// # Errors
    ///
    /// Returns `CapsuleError::InvalidMedia` if the extension is missing or
    /// not one of [`ALLOWED_EXTENSIONS`]. The comparison ignores case.
    pub fn validate(original_name: &str) -> Result<()> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension {
            Some(ref ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(CapsuleError::InvalidMedia(format!(
                "{} (accepted: {})",
                original_name,
                ALLOWED_EXTENSIONS.join(", ")
            ))),
        }
    }

    /// Store a blob for `username`, returning the path recorded on the entry.
    ///
    /// Layout: `<root>/<username>/media_<stamp>_<original name>`. The user
    /// directory is created if needed. An existing blob at the same path is
    /// overwritten; distinct stamps keep that from happening outside of
    /// same-second uploads of the same filename.
    ///
    /// # Errors
    ///
    /// Returns `CapsuleError::InvalidMedia` for a rejected extension, or
    /// `CapsuleError::Storage` if the directory or file write fails.
    pub fn store(&self, username: &str, stamp: &str, upload: &MediaUpload) -> Result<String> {
        Self::validate(&upload.original_name)?;

        let dir = self.root.join(username);
        fs::create_dir_all(&dir)
            .map_err(|e| CapsuleError::Storage(format!("Media directory create failed: {}", e)))?;

        let filename = format!("media_{}_{}", stamp, upload.original_name);
        let path = dir.join(filename);
        fs::write(&path, &upload.bytes)
            .map_err(|e| CapsuleError::Storage(format!("Media write failed: {}", e)))?;

        Ok(path.to_string_lossy().into_owned())
    }
}
