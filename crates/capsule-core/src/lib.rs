//! # Capsule Core
//!
//! Core library for Capsule - a personal journal keeper with per-user
//! accounts, dated entries, and optional media attachments.
//!
//! This crate provides the domain logic, storage, and data models
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: Journal store trait, the flat-file JSON backend, and media
//!   blob storage
//! - **session**: The signed-in identity for one interaction sequence
//! - **error**: Error hierarchy shared by all core operations
//! - **fs**: Atomic file replacement used by the persistence layer
//!
//! ## Storage model
//!
//! The whole user database is one JSON document: a map from username to a
//! record holding the account password and that user's entries in append
//! order. Every mutation rewrites the document in full via an atomic
//! temp-file-and-rename, so a crash mid-write never truncates the store.
//! Media blobs live next to it under a per-user directory tree.

pub mod error;
pub mod fs;
pub mod session;
pub mod store;

pub use error::{CapsuleError, Result};
pub use session::Session;
pub use store::{JournalStore, JsonJournal};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
