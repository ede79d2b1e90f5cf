//! Show entry command handler.

use capsule_core::JournalStore;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::ui::render::kv;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let username = super::require_signed_in(ctx)?;
    let journal = ctx.open_journal()?;

    let id = super::resolve_entry_id(&journal, &username, &args.id)?;
    let entry = journal.get_entry(&username, &id)?.ok_or_else(|| {
        CliError::not_found("Entry not found", "capsule list")
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let ui = ctx.ui_context(false, None);
    if !ctx.quiet() {
        println!("{}", kv(&ui, "ID", &entry.id.to_string()));
        println!("{}", kv(&ui, "Time", &entry.stamp));
        if let Some(ref media) = entry.media_file {
            println!("{}", kv(&ui, "Media", media));
        }
        println!();
    }
    println!("{}", entry.text);
    Ok(())
}
