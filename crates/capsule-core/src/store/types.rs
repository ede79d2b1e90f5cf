//! Core data types for the journal store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display timestamp format for entries, second granularity.
///
/// Underscores instead of colons keep the stamp usable inside media
/// filenames on every platform.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H_%M_%S";

/// Format a point in time as an entry display stamp.
pub fn display_stamp(at: DateTime<Utc>) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// One journal record.
///
/// Identity is the generated `id`; the `stamp` is a human-readable display
/// field. Two entries saved within the same clock second share a stamp but
/// remain distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier for this entry.
    ///
    /// Journal files written before this field existed deserialize by
    /// minting a fresh id per entry.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// When this entry was created ("YYYY-MM-DD HH_MM_SS"), display only
    #[serde(rename = "time")]
    pub stamp: String,

    /// Entry body
    #[serde(rename = "entry")]
    pub text: String,

    /// Path of an attached media blob, if any
    pub media_file: Option<String>,
}

/// A registered account: its password and entries in append order.
///
/// Passwords are held as the user typed them. That is faithful to the
/// system this store persists for and is the documented reason the format
/// must not hold anything an attacker would want.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,

    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl UserRecord {
    /// A fresh record with no entries.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            entries: Vec::new(),
        }
    }
}

/// The full persisted mapping of usernames to their records.
///
/// This is the sole unit of persistence: every mutation serializes the
/// whole map and rewrites the journal file.
pub type Database = BTreeMap<String, UserRecord>;

/// An uploaded media blob awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    /// Filename as uploaded; its extension is checked against the allow-list
    pub original_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes,
        }
    }
}

/// Builder for creating new entries.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    /// Entry body
    pub text: String,

    /// Optional media upload stored alongside the entry
    pub media: Option<MediaUpload>,
}

impl NewEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            media: None,
        }
    }

    pub fn with_media(mut self, upload: MediaUpload) -> Self {
        self.media = Some(upload);
        self
    }
}
