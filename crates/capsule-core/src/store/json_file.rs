//! Flat-file JSON journal backend.
//!
//! The whole user database lives in one JSON document, held in memory and
//! rewritten atomically on every mutation. Wire shape:
//!
//! ```json
//! { "<username>": { "password": "...", "entries": [
//!     { "id": "...", "time": "YYYY-MM-DD HH_MM_SS", "entry": "...", "media_file": null }
//! ] } }
//! ```
//!
//! Whole-file granularity means concurrent processes writing the same
//! journal race last-writer-wins; the backend assumes one active session
//! and the atomic rename only protects against crashes, not against a
//! second writer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CapsuleError, Result};
use crate::store::media::MediaStore;
use crate::store::traits::JournalStore;
use crate::store::types::{display_stamp, Database, Entry, NewEntry, UserRecord};

/// Flat-file JSON journal.
pub struct JsonJournal {
    path: PathBuf,
    media: MediaStore,
    db: Database,
}

impl JsonJournal {
    /// Open a journal file, treating a missing file as an empty database.
    ///
    /// # Errors
    ///
    /// Returns `CapsuleError::Storage` if the file exists but cannot be
    /// read or is not a valid journal document.
    pub fn open(path: impl Into<PathBuf>, media_root: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let db = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                CapsuleError::Storage(format!(
                    "Journal file {} is not a valid journal document: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Database::new(),
            Err(e) => {
                return Err(CapsuleError::Storage(format!(
                    "Failed to read journal file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            media: MediaStore::new(media_root),
            db,
        })
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The media blob store backing this journal.
    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    /// Whether `username` has a registered account.
    pub fn user_exists(&self, username: &str) -> bool {
        self.db.contains_key(username)
    }

    /// Serialize the full database and rewrite the journal file atomically.
    fn persist(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.db)?;
        crate::fs::write_atomic(&self.path, &data)
    }

    fn user_mut(&mut self, username: &str) -> Result<&mut UserRecord> {
        self.db
            .get_mut(username)
            .ok_or_else(|| CapsuleError::UnknownUser(username.to_string()))
    }
}

impl JournalStore for JsonJournal {
    fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if self.db.contains_key(username) {
            return Err(CapsuleError::UsernameTaken(username.to_string()));
        }
        self.db
            .insert(username.to_string(), UserRecord::new(password));
        self.persist()
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        Ok(self
            .db
            .get(username)
            .map(|user| user.password == password)
            .unwrap_or(false))
    }

    fn save_entry(&mut self, username: &str, entry: NewEntry) -> Result<Entry> {
        if !self.db.contains_key(username) {
            return Err(CapsuleError::UnknownUser(username.to_string()));
        }

        let stamp = display_stamp(Utc::now());

        // Blob first: a failed media write must not leave an entry behind.
        let media_file = match &entry.media {
            Some(upload) => Some(self.media.store(username, &stamp, upload)?),
            None => None,
        };

        let record = Entry {
            id: Uuid::new_v4(),
            stamp,
            text: entry.text,
            media_file,
        };
        self.user_mut(username)?.entries.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn list_entries(&self, username: &str) -> Result<Vec<Entry>> {
        Ok(self
            .db
            .get(username)
            .map(|user| user.entries.clone())
            .unwrap_or_default())
    }

    fn get_entry(&self, username: &str, id: &Uuid) -> Result<Option<Entry>> {
        Ok(self
            .db
            .get(username)
            .and_then(|user| user.entries.iter().find(|entry| entry.id == *id))
            .cloned())
    }

    fn edit_entry(&mut self, username: &str, id: &Uuid, new_text: &str) -> Result<bool> {
        let user = self.user_mut(username)?;
        match user.entries.iter_mut().find(|entry| entry.id == *id) {
            Some(entry) => {
                entry.text = new_text.to_string();
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_entry(&mut self, username: &str, id: &Uuid) -> Result<bool> {
        let user = self.user_mut(username)?;
        match user.entries.iter().position(|entry| entry.id == *id) {
            Some(index) => {
                user.entries.remove(index);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_entries_at(&mut self, username: &str, stamp: &str) -> Result<usize> {
        let user = self.user_mut(username)?;
        let before = user.entries.len();
        user.entries.retain(|entry| entry.stamp != stamp);
        let removed = before - user.entries.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_journal(dir: &Path) -> JsonJournal {
        JsonJournal::open(dir.join("journal.json"), dir.join("media")).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let journal = open_journal(dir.path());
        assert!(!journal.user_exists("alice"));
        assert!(journal.list_entries("alice").unwrap().is_empty());
    }

    #[test]
    fn test_open_invalid_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.json");
        fs::write(&path, b"not json").unwrap();

        assert!(JsonJournal::open(&path, dir.path().join("media")).is_err());
    }

    #[test]
    fn test_register_persists_immediately() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();

        let reopened = open_journal(dir.path());
        assert!(reopened.user_exists("alice"));
        assert!(reopened.authenticate("alice", "pw1").unwrap());
    }

    #[test]
    fn test_register_duplicate_keeps_original() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();
        journal.save_entry("alice", NewEntry::new("first")).unwrap();

        let err = journal.register("alice", "pw2").unwrap_err();
        assert!(matches!(err, CapsuleError::UsernameTaken(_)));
        assert!(journal.authenticate("alice", "pw1").unwrap());
        assert!(!journal.authenticate("alice", "pw2").unwrap());
        assert_eq!(journal.list_entries("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_authenticate_exact_match_only() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();

        assert!(journal.authenticate("alice", "pw1").unwrap());
        assert!(!journal.authenticate("alice", "PW1").unwrap());
        assert!(!journal.authenticate("alice", "pw1 ").unwrap());
        assert!(!journal.authenticate("nobody", "pw1").unwrap());
    }

    #[test]
    fn test_save_entry_requires_registered_user() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());

        let err = journal
            .save_entry("ghost", NewEntry::new("hello"))
            .unwrap_err();
        assert!(matches!(err, CapsuleError::UnknownUser(_)));
        assert!(!journal.user_exists("ghost"));
    }

    #[test]
    fn test_save_entry_appends_in_order() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();

        journal.save_entry("alice", NewEntry::new("first")).unwrap();
        journal
            .save_entry("alice", NewEntry::new("second"))
            .unwrap();

        let entries = journal.list_entries("alice").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "first");
        assert_eq!(entries[1].text, "second");
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_save_entry_with_media_stores_blob() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();

        let entry = journal
            .save_entry(
                "alice",
                NewEntry::new("with media")
                    .with_media(crate::store::MediaUpload::new("cat.png", vec![1, 2, 3])),
            )
            .unwrap();

        let blob_path = PathBuf::from(entry.media_file.unwrap());
        assert_eq!(fs::read(&blob_path).unwrap(), vec![1, 2, 3]);
        assert!(blob_path.starts_with(dir.path().join("media").join("alice")));
    }

    #[test]
    fn test_save_entry_rejected_media_leaves_database_unchanged() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();

        let result = journal.save_entry(
            "alice",
            NewEntry::new("bad upload")
                .with_media(crate::store::MediaUpload::new("notes.txt", vec![1])),
        );

        assert!(matches!(result, Err(CapsuleError::InvalidMedia(_))));
        assert!(journal.list_entries("alice").unwrap().is_empty());
    }

    #[test]
    fn test_edit_entry_overwrites_text() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();
        let entry = journal.save_entry("alice", NewEntry::new("hello")).unwrap();

        assert!(journal
            .edit_entry("alice", &entry.id, "hello edited")
            .unwrap());

        let entries = journal.list_entries("alice").unwrap();
        assert_eq!(entries[0].text, "hello edited");
        assert_eq!(entries[0].id, entry.id);
        assert_eq!(entries[0].stamp, entry.stamp);
    }

    #[test]
    fn test_edit_missing_entry_leaves_list_unchanged() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();
        journal.save_entry("alice", NewEntry::new("hello")).unwrap();

        let edited = journal
            .edit_entry("alice", &Uuid::new_v4(), "other")
            .unwrap();

        assert!(!edited);
        let entries = journal.list_entries("alice").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "hello");
    }

    #[test]
    fn test_delete_entry_by_id() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();
        let first = journal.save_entry("alice", NewEntry::new("first")).unwrap();
        journal
            .save_entry("alice", NewEntry::new("second"))
            .unwrap();

        assert!(journal.delete_entry("alice", &first.id).unwrap());
        assert!(!journal.delete_entry("alice", &first.id).unwrap());

        let entries = journal.list_entries("alice").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "second");
    }

    #[test]
    fn test_delete_entries_at_removes_all_with_stamp() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();
        let first = journal.save_entry("alice", NewEntry::new("first")).unwrap();
        let second = journal
            .save_entry("alice", NewEntry::new("second"))
            .unwrap();

        // Force a shared stamp rather than racing the clock.
        let shared = first.stamp.clone();
        {
            let user = journal.db.get_mut("alice").unwrap();
            for entry in &mut user.entries {
                entry.stamp = shared.clone();
            }
        }
        assert_eq!(second.id, journal.list_entries("alice").unwrap()[1].id);

        let removed = journal.delete_entries_at("alice", &shared).unwrap();
        assert_eq!(removed, 2);
        assert!(journal.list_entries("alice").unwrap().is_empty());

        assert_eq!(journal.delete_entries_at("alice", &shared).unwrap(), 0);
    }

    #[test]
    fn test_mutations_reject_unknown_user() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        let id = Uuid::new_v4();

        assert!(matches!(
            journal.edit_entry("ghost", &id, "x"),
            Err(CapsuleError::UnknownUser(_))
        ));
        assert!(matches!(
            journal.delete_entry("ghost", &id),
            Err(CapsuleError::UnknownUser(_))
        ));
        assert!(matches!(
            journal.delete_entries_at("ghost", "stamp"),
            Err(CapsuleError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_round_trip_reproduces_database() {
        let dir = tempdir().unwrap();
        let mut journal = open_journal(dir.path());
        journal.register("alice", "pw1").unwrap();
        journal.register("bob", "pw2").unwrap();
        journal.save_entry("alice", NewEntry::new("hello")).unwrap();

        let reopened = open_journal(dir.path());
        assert_eq!(reopened.db, journal.db);
    }
}
