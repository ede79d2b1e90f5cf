//! Edit entry command handler.

use capsule_core::JournalStore;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::read_entry_text;
use crate::ui::render::{badge, kv};
use crate::ui::Badge;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let username = super::require_signed_in(ctx)?;
    let mut journal = ctx.open_journal()?;

    let id = super::resolve_entry_id(&journal, &username, &args.id)?;
    let editor = ctx.editor()?;
    let text = read_entry_text(args.no_input, args.text.clone(), editor.as_deref())?;

    if !journal.edit_entry(&username, &id, &text)? {
        return Err(CliError::not_found("Entry not found", "capsule list").into());
    }

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!("{}", badge(&ui, Badge::Ok, "Entry updated"));
        println!("{}", kv(&ui, "Entry ID", &id.to_string()));
    }
    Ok(())
}
