//! Init, completions, and the no-subcommand quickstart.

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;

use capsule_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, CompletionsArgs, InitArgs};
use crate::config::{self, CapsuleConfig};
use crate::ui::render::{badge, hint, kv};
use crate::ui::Badge;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let journal_path = match &args.path {
        Some(path) => PathBuf::from(path),
        None => ctx.journal_path()?,
    };
    let media_root = match &ctx.cli().media_root {
        Some(root) => PathBuf::from(root),
        None => journal_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("media"),
    };

    let config_path = config::default_config_path()?;
    let cfg = CapsuleConfig::new(journal_path.clone(), media_root, args.editor.clone());
    config::write_config(&config_path, &cfg)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!("{}", badge(&ui, Badge::Ok, "Initialized journal config"));
        println!(
            "{}",
            kv(&ui, "Journal", &journal_path.to_string_lossy())
        );
        println!(
            "{}",
            kv(&ui, "Config", &config_path.to_string_lossy())
        );
        println!("{}", hint(&ui, "capsule register <username>"));
    }
    Ok(())
}

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "capsule", &mut std::io::stdout());
    Ok(())
}

pub fn print_quickstart(ctx: &AppContext) {
    if ctx.quiet() {
        return;
    }
    println!("Capsule v{}", VERSION);
    println!();
    println!("Quickstart:");
    println!("  capsule init               # choose where the journal lives");
    println!("  capsule register <name>    # create an account");
    println!("  capsule login <name>       # sign in");
    println!("  capsule write --text \"hello\"");
    println!("  capsule list");
    println!();
    println!("Run `capsule --help` for all commands.");
}
