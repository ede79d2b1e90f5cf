//! Entry command handlers and their shared plumbing.

pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod write;

use capsule_core::{JournalStore, JsonJournal};
use uuid::Uuid;

use crate::app::AppContext;
use crate::errors::CliError;

/// The signed-in username, or an auth failure pointing at `login`.
///
/// Every entry command goes through this gate; entry operations are not
/// reachable without a persisted session identity.
pub(crate) fn require_signed_in(ctx: &AppContext) -> anyhow::Result<String> {
    let session = ctx.load_session()?;
    match session.current() {
        Some(username) => Ok(username.to_string()),
        None => Err(CliError::auth_failed_with_hint(
            "No user is signed in.",
            "capsule login <username>",
        )
        .into()),
    }
}

/// Resolve an entry ID argument: a full UUID, or a unique prefix of one.
pub(crate) fn resolve_entry_id(
    journal: &JsonJournal,
    username: &str,
    input: &str,
) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    let needle = input.to_ascii_lowercase();
    let matches: Vec<Uuid> = journal
        .list_entries(username)?
        .iter()
        .filter(|entry| entry.id.to_string().starts_with(&needle))
        .map(|entry| entry.id)
        .collect();

    match matches.len() {
        0 => Err(CliError::not_found(
            format!("No entry matches ID \"{}\"", input),
            "capsule list",
        )
        .into()),
        1 => Ok(matches[0]),
        n => Err(CliError::invalid_input(format!(
            "Entry ID \"{}\" is ambiguous ({} matches); use more characters",
            input, n
        ))
        .into()),
    }
}
