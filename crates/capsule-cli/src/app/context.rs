//! Application context for the Capsule CLI.
//!
//! Bundles CLI arguments with lazily-loaded configuration so handlers get
//! one value instead of threading paths and flags individually.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use capsule_core::{JsonJournal, Session};

use crate::cli::Cli;
use crate::config::{self, CapsuleConfig};
use crate::ui::UiContext;

use super::session_file;

/// Application context that bundles CLI args with configuration and session
/// state.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<CapsuleConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Build a UI context from per-command output flags and global flags.
    pub fn ui_context(&self, json_flag: bool, format_flag: Option<&str>) -> UiContext {
        UiContext::from_env(
            json_flag,
            format_flag,
            self.cli.no_color,
            self.cli.ascii,
        )
    }

    /// The config file contents, loaded lazily; `None` when absent.
    fn config(&self) -> anyhow::Result<&Option<CapsuleConfig>> {
        self.config.get_or_try_init(|| {
            let path = config::default_config_path()?;
            if path.exists() {
                Ok(Some(config::read_config(&path)?))
            } else {
                Ok(None)
            }
        })
    }

    /// The journal file path: `--journal` flag, then config, then default.
    pub fn journal_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(ref value) = self.cli.journal {
            return Ok(PathBuf::from(value));
        }
        if let Some(cfg) = self.config()? {
            return Ok(PathBuf::from(&cfg.journal.path));
        }
        config::default_journal_path()
    }

    /// The media root: `--media-root` flag, then config, then a `media`
    /// directory next to the journal file.
    pub fn media_root(&self) -> anyhow::Result<PathBuf> {
        if let Some(ref value) = self.cli.media_root {
            return Ok(PathBuf::from(value));
        }
        if let Some(cfg) = self.config()? {
            return Ok(PathBuf::from(&cfg.media.root));
        }
        let journal = self.journal_path()?;
        let parent = journal.parent().unwrap_or_else(|| std::path::Path::new("."));
        Ok(parent.join("media"))
    }

    /// The configured editor override, if any.
    pub fn editor(&self) -> anyhow::Result<Option<String>> {
        Ok(self
            .config()?
            .as_ref()
            .and_then(|cfg| cfg.ui.editor.clone()))
    }

    /// Open the journal backing store.
    pub fn open_journal(&self) -> anyhow::Result<JsonJournal> {
        let journal = JsonJournal::open(self.journal_path()?, self.media_root()?)?;
        Ok(journal)
    }

    /// Restore the session from the persisted identity, if any.
    pub fn load_session(&self) -> anyhow::Result<Session> {
        Ok(match session_file::load()? {
            Some(username) => Session::signed_in(username),
            None => Session::new(),
        })
    }

    /// Persist a signed-in identity for later invocations.
    pub fn store_session(&self, username: &str) -> anyhow::Result<()> {
        session_file::store(username)
    }

    /// Drop the persisted identity. Succeeds if none was stored.
    pub fn clear_session(&self) -> anyhow::Result<()> {
        session_file::clear()
    }
}
