//! Account command handlers: register, login, logout, whoami.

use capsule_core::{CapsuleError, JournalStore};

use crate::app::AppContext;
use crate::cli::{LoginArgs, RegisterArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_new_password, prompt_password};
use crate::ui::render::{badge, hint};
use crate::ui::Badge;

pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    if args.username.trim().is_empty() {
        return Err(CliError::invalid_input("Username cannot be empty").into());
    }

    let mut journal = ctx.open_journal()?;
    let password = prompt_new_password()?;
    if password.is_empty() {
        return Err(CliError::invalid_input("Password cannot be empty").into());
    }

    match journal.register(&args.username, &password) {
        Ok(()) => {}
        Err(CapsuleError::UsernameTaken(name)) => {
            return Err(CliError::invalid_input(format!(
                "Username \"{}\" is already taken. Choose a different username.",
                name
            ))
            .into());
        }
        Err(err) => return Err(err.into()),
    }

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!(
            "{}",
            badge(
                &ui,
                Badge::Ok,
                &format!("Registered \"{}\". You can now log in.", args.username)
            )
        );
        println!(
            "{}",
            hint(&ui, &format!("capsule login {}", args.username))
        );
    }
    Ok(())
}

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let journal = ctx.open_journal()?;
    let password = prompt_password()?;

    if !journal.authenticate(&args.username, &password)? {
        return Err(CliError::auth_failed("Invalid username or password.").into());
    }

    let mut session = ctx.load_session()?;
    session.sign_in(args.username.clone());
    ctx.store_session(session.require_user()?)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!(
            "{}",
            badge(&ui, Badge::Ok, &format!("Welcome, {}!", args.username))
        );
        println!("{}", hint(&ui, "capsule write  \u{00B7}  capsule list"));
    }
    Ok(())
}

pub fn handle_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.load_session()?;
    let previous = session.sign_out();
    ctx.clear_session()?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match previous {
            Some(username) => println!(
                "{}",
                badge(&ui, Badge::Ok, &format!("Signed out {}", username))
            ),
            None => println!("No user is signed in."),
        }
    }
    Ok(())
}

pub fn handle_whoami(ctx: &AppContext) -> anyhow::Result<()> {
    let session = ctx.load_session()?;
    match session.current() {
        Some(username) => println!("{}", username),
        None => {
            if !ctx.quiet() {
                println!("No user is signed in.");
            }
        }
    }
    Ok(())
}
