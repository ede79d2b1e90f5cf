//! Password prompts and entry body input.

use std::io::{self, IsTerminal, Read};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::Password;

/// Read a password for login, preferring `CAPSULE_PASSWORD` over a prompt.
///
/// The environment override keeps scripted and test invocations away from
/// the interactive prompt.
pub fn prompt_password() -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("CAPSULE_PASSWORD") {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read a password for registration, with confirmation when prompting.
pub fn prompt_new_password() -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("CAPSULE_PASSWORD") {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    Password::new()
        .with_prompt("Choose a password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Resolve the entry body from `--text`, piped stdin, or an editor.
pub fn read_entry_text(
    no_input: bool,
    text: Option<String>,
    editor_override: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(value) = text {
        if value.trim().is_empty() {
            return Err(anyhow::anyhow!("--text cannot be empty"));
        }
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end().to_string();
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("No input provided on stdin"));
        }
        return Ok(trimmed);
    }

    if no_input {
        return Err(anyhow::anyhow!("--no-input requires content from stdin"));
    }

    read_text_from_editor(editor_override)
}

fn read_text_from_editor(editor_override: Option<&str>) -> anyhow::Result<String> {
    let editor = match editor_override {
        Some(value) => value.to_string(),
        None => std::env::var("EDITOR").map_err(|_| {
            anyhow::anyhow!("$EDITOR is not set; use --text or pipe content via stdin")
        })?,
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let filename = format!("capsule_entry_{}_{}.md", std::process::id(), nanos);
    let path = std::env::temp_dir().join(filename);

    std::fs::write(&path, "").map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    let status = Command::new(editor)
        .arg(&path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e))?;
    if !status.success() {
        let _ = std::fs::remove_file(&path);
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?;
    let _ = std::fs::remove_file(&path);

    let trimmed = contents.trim_end().to_string();
    if trimmed.is_empty() {
        return Err(anyhow::anyhow!("Entry body is empty"));
    }

    Ok(trimmed)
}
