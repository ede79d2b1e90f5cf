//! Journal storage: trait, flat-file JSON backend, and media blobs.
//!
//! The [`JournalStore`] trait defines account and entry operations; the
//! shipped backend is [`JsonJournal`], which keeps the whole database in one
//! JSON document and rewrites it atomically on every mutation. Uploaded
//! media blobs are written by [`MediaStore`] under a per-user directory
//! tree and referenced by path from entries.

mod json_file;
mod media;
mod traits;
mod types;

pub use json_file::JsonJournal;
pub use media::{MediaStore, ALLOWED_EXTENSIONS};
pub use traits::JournalStore;
pub use types::{display_stamp, Database, Entry, MediaUpload, NewEntry, UserRecord, STAMP_FORMAT};
