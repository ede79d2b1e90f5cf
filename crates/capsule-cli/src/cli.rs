use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use capsule_core::VERSION;

/// Capsule - a personal journal keeper with accounts, dated entries, and media
#[derive(Parser)]
#[command(name = "capsule")]
#[command(version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal file
    #[arg(long, global = true, env = "CAPSULE_JOURNAL")]
    pub journal: Option<String>,

    /// Directory for uploaded media blobs
    #[arg(long, global = true, env = "CAPSULE_MEDIA_ROOT")]
    pub media_root: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// ASCII-only output (no unicode symbols)
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the journal file will live
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Set default editor for composing entries
    #[arg(long)]
    pub editor: Option<String>,
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Username to register
    #[arg(value_name = "USERNAME")]
    pub username: String,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Username to sign in as
    #[arg(value_name = "USERNAME")]
    pub username: String,
}

/// Arguments for the `write` command
#[derive(Args)]
pub struct WriteArgs {
    /// Entry body (overrides stdin/editor)
    #[arg(long)]
    pub text: Option<String>,

    /// Attach a media file (jpg, jpeg, png, gif, mp4)
    #[arg(long, value_name = "FILE")]
    pub media: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New entry body (overrides stdin/editor)
    #[arg(long)]
    pub text: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full UUID)
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Delete every entry with this display stamp instead
    #[arg(long, value_name = "STAMP", conflicts_with = "id")]
    pub at: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config pointing at a journal location
    Init(InitArgs),

    /// Register a new account
    Register(RegisterArgs),

    /// Sign in and persist the session identity
    Login(LoginArgs),

    /// Sign out, clearing the session identity
    Logout,

    /// Show the signed-in username
    Whoami,

    /// Write a journal entry for the signed-in user
    Write(WriteArgs),

    /// List the signed-in user's entries
    List(ListArgs),

    /// Show a specific entry by ID
    Show(ShowArgs),

    /// Replace the text of an entry
    Edit(EditArgs),

    /// Delete an entry by ID, or every entry sharing a stamp
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
