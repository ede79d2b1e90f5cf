//! Capsule CLI - a personal journal keeper with accounts, dated entries,
//! and media attachments.
//!
//! This is the command-line interface for Capsule. It provides the
//! interaction surface over the core library: registration, login, and
//! entry composition, listing, editing, and deletion.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::Parser;

use app::AppContext;
use cli::{Cli, Commands};
use errors::{core_exit_code, CliError};

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(err) = run(&ctx) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            eprintln!("Error: {}", cli_err);
            std::process::exit(cli_err.exit_code());
        }
        if let Some(core_err) = err.downcast_ref::<capsule_core::CapsuleError>() {
            eprintln!("Error: {}", core_err);
            std::process::exit(core_exit_code(core_err));
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(constants::exit_codes::GENERIC);
    }
}

fn run(ctx: &AppContext) -> anyhow::Result<()> {
    match ctx.cli().command {
        Some(Commands::Init(ref args)) => commands::misc::handle_init(ctx, args),
        Some(Commands::Register(ref args)) => commands::account::handle_register(ctx, args),
        Some(Commands::Login(ref args)) => commands::account::handle_login(ctx, args),
        Some(Commands::Logout) => commands::account::handle_logout(ctx),
        Some(Commands::Whoami) => commands::account::handle_whoami(ctx),
        Some(Commands::Write(ref args)) => commands::entries::write::handle_write(ctx, args),
        Some(Commands::List(ref args)) => commands::entries::list::handle_list(ctx, args),
        Some(Commands::Show(ref args)) => commands::entries::show::handle_show(ctx, args),
        Some(Commands::Edit(ref args)) => commands::entries::edit::handle_edit(ctx, args),
        Some(Commands::Delete(ref args)) => commands::entries::delete::handle_delete(ctx, args),
        Some(Commands::Completions(ref args)) => commands::misc::handle_completions(args),
        None => {
            commands::misc::print_quickstart(ctx);
            Ok(())
        }
    }
}
