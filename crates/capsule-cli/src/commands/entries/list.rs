//! List entries command handler.

use std::path::Path;

use capsule_core::JournalStore;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::errors::CliError;
use crate::ui::format::{short_id, truncate};
use crate::ui::render::{simple_table, Column};

const TEXT_COLUMN_WIDTH: usize = 60;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let username = super::require_signed_in(ctx)?;
    let journal = ctx.open_journal()?;
    let entries = journal.list_entries(&username)?;

    validate_format(args)?;
    let ui = ctx.ui_context(args.json, args.format.as_deref());

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !ctx.quiet() {
            println!("No entries yet. Start writing!");
        }
        return Ok(());
    }

    let columns = [
        Column::new("ID"),
        Column::new("TIME"),
        Column::new("ENTRY"),
        Column::new("MEDIA"),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let id = if ui.mode.is_pretty() {
                short_id(&entry.id)
            } else {
                entry.id.to_string()
            };
            let media = entry
                .media_file
                .as_deref()
                .map(media_basename)
                .unwrap_or_else(|| "-".to_string());
            vec![
                id,
                entry.stamp.clone(),
                truncate(&entry.text, TEXT_COLUMN_WIDTH),
                media,
            ]
        })
        .collect();

    println!("{}", simple_table(&ui, &columns, &rows));
    Ok(())
}

fn validate_format(args: &ListArgs) -> anyhow::Result<()> {
    match args.format.as_deref() {
        None => {}
        Some("table") | Some("plain") => {
            if args.json {
                return Err(
                    CliError::invalid_input("--format cannot be used with --json").into(),
                );
            }
        }
        Some(other) => {
            return Err(CliError::invalid_input(format!(
                "Unsupported format: {} (use table or plain)",
                other
            ))
            .into());
        }
    }
    Ok(())
}

fn media_basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
