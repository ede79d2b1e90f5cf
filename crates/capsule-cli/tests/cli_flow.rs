//! End-to-end exercises of the `capsule` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_capsule"))
}

fn temp_base(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), nanos))
}

/// Per-test environment: isolated XDG dirs and a journal path.
struct TestEnv {
    config_home: PathBuf,
    data_home: PathBuf,
    journal: PathBuf,
}

impl TestEnv {
    fn new(prefix: &str) -> Self {
        let base = temp_base(prefix);
        let config_home = base.join("config");
        let data_home = base.join("data");
        std::fs::create_dir_all(&config_home).expect("create config dir");
        std::fs::create_dir_all(&data_home).expect("create data dir");
        let journal = base.join("journal.json");
        Self {
            config_home,
            data_home,
            journal,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .arg("--journal")
            .arg(&self.journal)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("XDG_DATA_HOME", &self.data_home)
            .env("CAPSULE_PASSWORD", "pw1");
        cmd
    }

    fn run(&self, args: &[&str]) -> std::process::Output {
        self.command(args).output().expect("run capsule")
    }

    fn run_ok(&self, args: &[&str]) -> std::process::Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "capsule {:?} failed: stdout={}, stderr={}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }
}

fn list_json(env: &TestEnv) -> serde_json::Value {
    let output = env.run_ok(&["list", "--json"]);
    serde_json::from_slice(&output.stdout).expect("parse list json")
}

fn register_and_login(env: &TestEnv, username: &str) {
    env.run_ok(&["register", username]);
    env.run_ok(&["login", username]);
}

#[test]
fn test_cli_register_login_write_list_edit_delete_flow() {
    let env = TestEnv::new("capsule_cli_flow");
    register_and_login(&env, "alice");

    env.run_ok(&["write", "--text", "hello"]);

    let value = list_json(&env);
    let array = value.as_array().expect("list output array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0].get("entry").and_then(|v| v.as_str()), Some("hello"));
    assert!(array[0].get("time").is_some());
    assert_eq!(
        array[0].get("media_file").map(|v| v.is_null()),
        Some(true)
    );
    let entry_id = array[0]
        .get("id")
        .and_then(|v| v.as_str())
        .expect("entry id")
        .to_string();

    env.run_ok(&["edit", &entry_id, "--text", "hello edited"]);
    let value = list_json(&env);
    assert_eq!(
        value.as_array().unwrap()[0].get("entry").and_then(|v| v.as_str()),
        Some("hello edited")
    );

    env.run_ok(&["delete", &entry_id]);
    let value = list_json(&env);
    assert!(value.as_array().unwrap().is_empty());
}

#[test]
fn test_cli_register_duplicate_username_fails() {
    let env = TestEnv::new("capsule_cli_dup");
    env.run_ok(&["register", "alice"]);

    let mut second = env.command(&["register", "alice"]);
    second.env("CAPSULE_PASSWORD", "pw2");
    let second = second.output().expect("run register");
    assert_eq!(second.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already taken"));

    // The original password still works; the second never registered.
    env.run_ok(&["login", "alice"]);
    let mut bad = env.command(&["login", "alice"]);
    bad.env("CAPSULE_PASSWORD", "pw2");
    let bad = bad.output().expect("run login");
    assert_eq!(bad.status.code(), Some(5));
}

#[test]
fn test_cli_login_wrong_password_exit_code() {
    let env = TestEnv::new("capsule_cli_badpw");
    env.run_ok(&["register", "alice"]);

    let mut login = env.command(&["login", "alice"]);
    login.env("CAPSULE_PASSWORD", "wrong");
    let login = login.output().expect("run login");

    assert_eq!(login.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&login.stderr);
    assert!(stderr.contains("Invalid username or password"));
}

#[test]
fn test_cli_login_unknown_user_exit_code() {
    let env = TestEnv::new("capsule_cli_nouser");
    let login = env.run(&["login", "nobody"]);
    assert_eq!(login.status.code(), Some(5));
}

#[test]
fn test_cli_write_requires_login() {
    let env = TestEnv::new("capsule_cli_gate");
    let write = env.run(&["write", "--text", "hello"]);

    assert_eq!(write.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&write.stderr);
    assert!(stderr.contains("No user is signed in"));
    assert!(stderr.contains("capsule login"));
}

#[test]
fn test_cli_write_with_media_stores_blob() {
    let env = TestEnv::new("capsule_cli_media");
    register_and_login(&env, "alice");

    let upload = temp_base("capsule_cli_media_src").with_extension("png");
    std::fs::write(&upload, [0x89, 0x50, 0x4E, 0x47]).expect("write upload");

    env.run_ok(&["write", "--text", "with media", "--media", upload.to_str().unwrap()]);

    let value = list_json(&env);
    let media_file = value.as_array().unwrap()[0]
        .get("media_file")
        .and_then(|v| v.as_str())
        .expect("media path")
        .to_string();

    let blob = Path::new(&media_file);
    assert!(blob.exists(), "blob missing at {}", media_file);
    assert_eq!(
        std::fs::read(blob).unwrap(),
        vec![0x89, 0x50, 0x4E, 0x47]
    );
    let name = blob.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("media_"));
    assert!(name.ends_with(".png"));
    assert!(media_file.contains("alice"));
}

#[test]
fn test_cli_write_rejects_media_extension() {
    let env = TestEnv::new("capsule_cli_badmedia");
    register_and_login(&env, "alice");

    let upload = temp_base("capsule_cli_badmedia_src").with_extension("txt");
    std::fs::write(&upload, b"plain text").expect("write upload");

    let write = env.run(&["write", "--text", "x", "--media", upload.to_str().unwrap()]);
    assert_eq!(write.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&write.stderr);
    assert!(stderr.contains("Unsupported media file"));

    assert!(list_json(&env).as_array().unwrap().is_empty());
}

#[test]
fn test_cli_write_reads_stdin_body() {
    let env = TestEnv::new("capsule_cli_stdin");
    register_and_login(&env, "alice");

    let mut write = env.command(&["write"]);
    let mut child = write
        .stdin(std::process::Stdio::piped())
        .spawn()
        .expect("spawn write");
    child
        .stdin
        .as_ref()
        .expect("stdin")
        .write_all(b"from stdin\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait write");
    assert!(output.status.success());

    let value = list_json(&env);
    assert_eq!(
        value.as_array().unwrap()[0].get("entry").and_then(|v| v.as_str()),
        Some("from stdin")
    );
}

#[test]
fn test_cli_show_unknown_id_exit_code() {
    let env = TestEnv::new("capsule_cli_show_missing");
    register_and_login(&env, "alice");

    let show = env.run(&["show", "00000000-0000-0000-0000-000000000000"]);
    assert_eq!(show.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&show.stderr);
    assert!(stderr.contains("Hint:"));
}

#[test]
fn test_cli_show_and_edit_accept_id_prefix() {
    let env = TestEnv::new("capsule_cli_prefix");
    register_and_login(&env, "alice");
    env.run_ok(&["write", "--text", "prefixed"]);

    let value = list_json(&env);
    let full_id = value.as_array().unwrap()[0]
        .get("id")
        .and_then(|v| v.as_str())
        .expect("entry id")
        .to_string();
    let prefix = &full_id[..8];

    let show = env.run_ok(&["show", prefix]);
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("prefixed"));

    env.run_ok(&["edit", prefix, "--text", "prefixed edited"]);
    let value = list_json(&env);
    assert_eq!(
        value.as_array().unwrap()[0].get("entry").and_then(|v| v.as_str()),
        Some("prefixed edited")
    );
}

#[test]
fn test_cli_delete_at_removes_same_stamp_entries() {
    let env = TestEnv::new("capsule_cli_delete_at");

    // Two entries sharing a display stamp, as saved within one clock second.
    let shared = "2024-03-09 14_30_05";
    let journal = format!(
        r#"{{
  "alice": {{
    "password": "pw1",
    "entries": [
      {{"id": "0b5ab476-16c1-4b2e-9d9f-0a4f4dcb7a01", "time": "{shared}", "entry": "first", "media_file": null}},
      {{"id": "1c6bc587-27d2-4c3f-8e8e-1b5f5edc8b12", "time": "{shared}", "entry": "second", "media_file": null}},
      {{"id": "2d7cd698-38e3-4d40-9f9f-2c606fed9c23", "time": "2024-03-09 14_30_06", "entry": "later", "media_file": null}}
    ]
  }}
}}"#
    );
    std::fs::write(&env.journal, journal).expect("seed journal");

    env.run_ok(&["login", "alice"]);
    let output = env.run_ok(&["delete", "--at", shared]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted 2 entries"));

    let value = list_json(&env);
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array[0].get("entry").and_then(|v| v.as_str()), Some("later"));

    // A stamp that matches nothing deletes nothing and still succeeds.
    let output = env.run_ok(&["delete", "--at", "1999-01-01 00_00_00"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted 0 entries"));
}

#[test]
fn test_cli_delete_requires_target() {
    let env = TestEnv::new("capsule_cli_delete_none");
    register_and_login(&env, "alice");

    let delete = env.run(&["delete"]);
    assert_eq!(delete.status.code(), Some(4));
}

#[test]
fn test_cli_whoami_and_logout_flow() {
    let env = TestEnv::new("capsule_cli_session");
    register_and_login(&env, "alice");

    let whoami = env.run_ok(&["whoami"]);
    assert_eq!(
        String::from_utf8_lossy(&whoami.stdout).trim(),
        "alice"
    );

    env.run_ok(&["logout"]);

    let whoami = env.run_ok(&["whoami"]);
    assert!(String::from_utf8_lossy(&whoami.stdout).contains("No user is signed in"));

    let write = env.run(&["write", "--text", "hello"]);
    assert_eq!(write.status.code(), Some(5));
}

#[test]
fn test_cli_list_empty_message() {
    let env = TestEnv::new("capsule_cli_empty");
    register_and_login(&env, "alice");

    let list = env.run_ok(&["list"]);
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("No entries yet"));
}

#[test]
fn test_cli_quickstart_output() {
    let env = TestEnv::new("capsule_cli_quickstart");
    let output = env.run_ok(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Quickstart"));
    assert!(stdout.contains("capsule init"));
}

#[test]
fn test_cli_init_writes_default_config() {
    let env = TestEnv::new("capsule_cli_init");
    let journal_path = env.journal.to_string_lossy().to_string();
    env.run_ok(&["init", &journal_path]);

    let config_path = env.config_home.join("capsule").join("config.toml");
    assert!(config_path.exists(), "config file should exist");

    let contents = std::fs::read_to_string(&config_path).expect("read config");
    let value: toml::Value = contents.parse().expect("parse config");
    assert_eq!(
        value
            .get("journal")
            .and_then(|section| section.get("path"))
            .and_then(|path| path.as_str()),
        Some(journal_path.as_str())
    );
    let media_root = value
        .get("media")
        .and_then(|section| section.get("root"))
        .and_then(|root| root.as_str())
        .expect("media root");
    assert!(media_root.ends_with("media"));
}

#[test]
fn test_cli_invalid_args_exit_code() {
    let output = Command::new(bin()).arg("show").output().expect("run show");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:") || stderr.contains("error:"));
}
