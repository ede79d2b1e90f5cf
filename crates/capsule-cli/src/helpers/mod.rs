//! Shared helpers for command handlers.

mod input;

pub use input::{prompt_new_password, prompt_password, read_entry_text};
