//! Delete entry command handler.
//!
//! Deletion targets either one entry by ID, or every entry sharing a
//! display stamp via `--at` (entries saved within the same clock second
//! share one). Media blobs referenced by deleted entries stay on disk.

use capsule_core::JournalStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::ui::render::badge;
use crate::ui::Badge;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let username = super::require_signed_in(ctx)?;
    let mut journal = ctx.open_journal()?;

    match (&args.id, &args.at) {
        (Some(input), None) => {
            let id = super::resolve_entry_id(&journal, &username, input)?;
            if !journal.delete_entry(&username, &id)? {
                return Err(CliError::not_found("Entry not found", "capsule list").into());
            }
            if !ctx.quiet() {
                let ui = ctx.ui_context(false, None);
                println!("{}", badge(&ui, Badge::Ok, "Entry deleted"));
            }
            Ok(())
        }
        (None, Some(stamp)) => {
            let removed = journal.delete_entries_at(&username, stamp)?;
            if !ctx.quiet() {
                let ui = ctx.ui_context(false, None);
                let noun = if removed == 1 { "entry" } else { "entries" };
                println!(
                    "{}",
                    badge(&ui, Badge::Ok, &format!("Deleted {} {}", removed, noun))
                );
            }
            Ok(())
        }
        // `conflicts_with` keeps both from arriving together.
        _ => Err(CliError::invalid_input("Provide an entry ID or --at <STAMP>").into()),
    }
}
