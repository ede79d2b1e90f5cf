//! Write entry command handler.

use std::fs;
use std::path::Path;

use capsule_core::store::{MediaStore, MediaUpload, NewEntry};
use capsule_core::JournalStore;

use crate::app::AppContext;
use crate::cli::WriteArgs;
use crate::errors::CliError;
use crate::helpers::read_entry_text;
use crate::ui::render::{badge, hint, kv};
use crate::ui::Badge;

use super::require_signed_in;

pub fn handle_write(ctx: &AppContext, args: &WriteArgs) -> anyhow::Result<()> {
    let username = require_signed_in(ctx)?;
    let mut journal = ctx.open_journal()?;

    let editor = ctx.editor()?;
    let text = read_entry_text(args.no_input, args.text.clone(), editor.as_deref())?;

    let mut new_entry = NewEntry::new(text);
    if let Some(ref media_path) = args.media {
        new_entry = new_entry.with_media(read_media_upload(media_path)?);
    }

    let entry = journal.save_entry(&username, new_entry)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!("{}", badge(&ui, Badge::Ok, "Entry saved"));
        println!("{}", kv(&ui, "Entry ID", &entry.id.to_string()));
        println!("{}", kv(&ui, "Time", &entry.stamp));
        if let Some(ref media) = entry.media_file {
            println!("{}", kv(&ui, "Media", media));
        }
        println!(
            "{}",
            hint(&ui, &format!("capsule show {}", entry.id))
        );
    }
    Ok(())
}

/// Read an upload from disk, rejecting disallowed extensions before the read.
fn read_media_upload(media_path: &str) -> anyhow::Result<MediaUpload> {
    let path = Path::new(media_path);
    let original_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::invalid_input(format!("Invalid media path: {}", media_path)))?
        .to_string();

    MediaStore::validate(&original_name)
        .map_err(|err| CliError::invalid_input(err.to_string()))?;

    let bytes = fs::read(path).map_err(|err| {
        CliError::not_found(
            format!("Failed to read media file {}: {}", media_path, err),
            "check the path and try again",
        )
    })?;

    Ok(MediaUpload::new(original_name, bytes))
}
