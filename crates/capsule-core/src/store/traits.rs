//! Journal store trait definition.
//!
//! The `JournalStore` trait defines the interface a journal backend must
//! implement: account registration and authentication, plus entry
//! create/list/edit/delete for registered users. The abstraction keeps the
//! CLI independent of the on-disk representation.

use uuid::Uuid;

use crate::error::Result;
use crate::store::types::{Entry, NewEntry};

/// Journal store interface.
///
/// All implementations must ensure:
/// - Mutations are persisted before the call returns
/// - Entry identity is the generated id, never the display stamp
/// - Entries keep append order
pub trait JournalStore {
    // --- Account operations ---

    /// Create an account with an empty entry list and persist it.
    ///
    /// # Errors
    ///
    /// Returns `CapsuleError::UsernameTaken` if the username already exists;
    /// the existing record is left untouched.
    fn register(&mut self, username: &str, password: &str) -> Result<()>;

    /// Check a password against the stored one.
    ///
    /// Returns `Ok(true)` iff the stored password for `username` exactly
    /// equals `password`. An unknown username yields `Ok(false)`, not an
    /// error, so callers cannot distinguish the two cases.
    fn authenticate(&self, username: &str, password: &str) -> Result<bool>;

    // --- Entry operations ---
    //
    // Mutating operations require a registered username and fail with
    // `CapsuleError::UnknownUser` otherwise; silently fabricating an
    // account on first write is explicitly not supported.

    /// Stamp, store, and persist a new entry for `username`.
    ///
    /// A media upload, if present, is written to blob storage first; when
    /// that write fails the database is left unchanged, so no entry ever
    /// references a blob that failed to land.
    ///
    /// # Errors
    ///
    /// Returns `CapsuleError::UnknownUser` for an unregistered username,
    /// `CapsuleError::InvalidMedia` for a rejected upload, or
    /// `CapsuleError::Storage` if persisting fails.
    fn save_entry(&mut self, username: &str, entry: NewEntry) -> Result<Entry>;

    /// The user's entries in append order.
    ///
    /// An unknown username yields an empty list; the read path stays
    /// lenient where the write path is strict.
    fn list_entries(&self, username: &str) -> Result<Vec<Entry>>;

    /// Get one entry by id.
    ///
    /// Returns `Ok(None)` when the user or the entry is absent.
    fn get_entry(&self, username: &str, id: &Uuid) -> Result<Option<Entry>>;

    /// Overwrite the text of the entry with the given id and persist.
    ///
    /// Returns `Ok(false)`, leaving the list untouched, when no entry
    /// matches.
    fn edit_entry(&mut self, username: &str, id: &Uuid, new_text: &str) -> Result<bool>;

    /// Remove the entry with the given id and persist.
    ///
    /// Returns `Ok(false)` when no entry matches. The entry's media blob,
    /// if any, stays on disk.
    fn delete_entry(&mut self, username: &str, id: &Uuid) -> Result<bool>;

    /// Remove every entry whose display stamp equals `stamp`, returning the
    /// count removed.
    ///
    /// Entries saved within the same clock second share a stamp; this
    /// removes all of them, which is the point of the operation.
    fn delete_entries_at(&mut self, username: &str, stamp: &str) -> Result<usize>;
}
