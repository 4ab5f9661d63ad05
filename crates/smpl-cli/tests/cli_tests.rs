//! Integration tests for the `smpl` binary.
//!
//! Every test runs offline: generation goes through `--schema FILE`, and
//! config/data directories point into a temp dir.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use assert_cmd::Command;
use tempfile::TempDir;

const APP_SCHEMA: &str = r#"{
  "app_name": "Pantry",
  "platform": "mobile",
  "description": "Track what is in the kitchen",
  "pages": [
    {"id": "shelf", "type": "list", "title": "Shelf", "components": ["item_card", "search"]},
    {"id": "account", "type": "settings", "title": "Account", "components": ["profile_form"], "auth_required": true}
  ],
  "data_models": [
    {"name": "Item", "fields": [
      {"name": "title", "type": "string"},
      {"name": "expires", "type": "date", "optional": true}
    ]}
  ],
  "actions": [
    {"name": "AddItem", "trigger": "button.click", "steps": ["validate", "persist"]}
  ]
}"#;

fn smpl(home: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("smpl");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("SMPL_HISTORY__PATH", home.join("history.jsonl"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("OPENAI_API_KEY");
    cmd
}

fn schema_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("pantry.json");
    fs::write(&path, APP_SCHEMA).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("tools"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn tools_list_has_every_identifier() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["tools", "--format", "list"])
        .assert()
        .success()
        .stdout("cursor\nclaude\nbolt\nv0\nreplit\nopenai\nanthropic\n");
}

#[test]
fn render_dsl_from_schema_file() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .arg("render")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("APP(Pantry){"))
        .stdout(predicate::str::contains("account[settings]: profile_form (protected)"));
}

#[test]
fn render_markdown() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .arg("render")
        .arg(&schema)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Pantry"));
}

#[test]
fn render_missing_file_exits_3() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["render", "nope.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn render_invalid_schema_exits_2() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.json");
    fs::write(&path, r#"{"app_name": "X"}"#).unwrap();
    smpl(home.path()).arg("render").arg(&path).assert().code(2);
}

#[test]
fn generate_offline_prints_dsl_and_tokens() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .args(["generate", "a pantry tracker for my kitchen", "--tool", "claude", "--schema"])
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("APP(Pantry){"))
        .stdout(predicate::str::contains("Token Analysis"))
        .stdout(predicate::str::contains("(approximate)"));
}

#[test]
fn generate_json_output_and_history() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    let out = smpl(home.path())
        .args([
            "--output-format",
            "json",
            "generate",
            "CREATE TABLE items (id int)",
            "--show",
            "dsl,tokens",
            "--schema",
        ])
        .arg(&schema)
        .output()
        .unwrap();
    assert!(out.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["input_kind"], "sql");
    assert_eq!(doc["tool"], "cursor");
    assert!(doc["dsl"].as_str().unwrap().starts_with("APP(Pantry){"));
    assert_eq!(doc["token_stats"]["dsl"]["exact"], true);

    smpl(home.path())
        .args(["history", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE items"));
}

#[test]
fn no_history_flag_skips_recording() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .args(["generate", "pantry", "--no-history", "--schema"])
        .arg(&schema)
        .assert()
        .success();
    assert!(!home.path().join("history.jsonl").exists());
}

#[test]
fn unknown_tool_falls_back_to_cursor() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .args([
            "--output-format",
            "json",
            "generate",
            "x",
            "--tool",
            "emacs",
            "--no-history",
            "--schema",
        ])
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tool": "cursor""#))
        .stderr(predicate::str::contains("Unknown tool"));
}

#[test]
fn enhance_offline_adds_one_section() {
    let home = TempDir::new().unwrap();
    let out = smpl(home.path())
        .args([
            "--output-format",
            "json",
            "enhance",
            "A portfolio site with a contact form",
            "--with",
            "hover-effects,scroll-animations,hover-effects",
            "--offline",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["mode"], "app");
    assert_eq!(
        doc["enhancements"],
        serde_json::json!(["hover-effects", "scroll-animations"])
    );
    assert_eq!(doc["original_length"], 36);
    let text = doc["text"].as_str().unwrap();
    assert!(text.starts_with("A portfolio site with a contact form\n\n## UI/UX Enhancements"));
    assert!(!home.path().join("history.jsonl").exists());
}

#[test]
fn enhance_without_selection_is_usage_error() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["enhance", "a site", "--offline"])
        .assert()
        .code(2);
}

#[test]
fn missing_api_key_exits_4() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["generate", "a todo app"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn session_shrink_then_restore_returns_original_dsl() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    let out = smpl(home.path())
        .args([
            "--output-format",
            "json",
            "session",
            "pantry",
            "--steps",
            "shrink,restore",
            "--schema",
        ])
        .arg(&schema)
        .output()
        .unwrap();
    assert!(out.status.success());

    let trail: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let steps = trail.as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[1]["snapshot"]["state"], "modified");
    assert_eq!(steps[2]["snapshot"]["state"], "pristine");
    assert_eq!(
        steps[0]["snapshot"]["slots"]["dsl"],
        steps[2]["snapshot"]["slots"]["dsl"]
    );
    assert_ne!(
        steps[0]["snapshot"]["slots"]["dsl"],
        steps[1]["snapshot"]["slots"]["dsl"]
    );
}

#[test]
fn session_restore_before_shrink_exits_2() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .args(["session", "pantry", "--steps", "restore", "--schema"])
        .arg(&schema)
        .assert()
        .code(2);
}

#[test]
fn session_without_terminal_needs_steps() {
    let home = TempDir::new().unwrap();
    let schema = schema_file(&home);
    smpl(home.path())
        .args(["session", "pantry", "--schema"])
        .arg(&schema)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--steps"));
}

#[test]
fn tokens_exact_for_gpt_family() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["tokens", "hello world", "--family", "gpt"])
        .assert()
        .success()
        .stdout("2 tokens (exact)\n");
}

#[test]
fn init_local_then_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    smpl(home.path()).args(["init", "--local"]).assert().success();
    assert!(home.path().join("smpl.toml").exists());

    smpl(home.path())
        .args(["init", "--local"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    smpl(home.path())
        .args(["init", "--local", "--force"])
        .assert()
        .success();
}

#[test]
fn local_config_sets_default_tool() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("smpl.toml"), "[defaults]\ntool = \"v0\"\n").unwrap();
    smpl(home.path())
        .args(["config", "get", "defaults.tool"])
        .assert()
        .success()
        .stdout("v0\n");
}

#[test]
fn env_overrides_config() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .env("SMPL_LLM__MODEL", "gpt-4o")
        .args(["config", "get", "llm.model"])
        .assert()
        .success()
        .stdout("gpt-4o\n");
}

#[test]
fn config_unknown_key_exits_4() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["config", "get", "llm.nope"])
        .assert()
        .code(4);
}

#[test]
fn config_path_points_at_config_toml() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_generate_for_bash() {
    let home = TempDir::new().unwrap();
    smpl(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smpl"));
}
