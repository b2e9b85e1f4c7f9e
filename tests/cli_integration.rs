//! Integration tests for the command-line interface
//!
//! Runs the built binary against temporary pages and checks output, exit
//! status and target resolution.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PAGE: &str = r#"<style>
  .historyItem{padding:4px}
</style>
<script>
  row.className = "historyItem";
</script>
"#;

fn patcher() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_history-patcher"));
    cmd.env_remove("HISTORY_PATCHER_TARGET")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn setup_page(dir: &Path) -> std::path::PathBuf {
    let index = dir.join("index.html");
    fs::write(&index, PAGE).unwrap();
    index
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help() {
    let output = patcher().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--diff"));
    assert!(stdout.contains("HISTORY_PATCHER_TARGET"));
}

#[test]
fn test_apply_success() {
    let dir = TempDir::new().unwrap();
    let index = setup_page(dir.path());

    let output = patcher().arg(&index).output().unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Changes applied successfully"));

    let patched = fs::read_to_string(&index).unwrap();
    assert!(patched.contains(".historyItem.older{"));
    assert!(patched.contains(r#"row.classList.add("older");"#));
}

#[test]
fn test_dry_run_does_not_modify() {
    let dir = TempDir::new().unwrap();
    let index = setup_page(dir.path());

    let output = patcher().arg(&index).arg("--dry-run").output().unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Dry run"));
    assert!(stdout.contains("1 CSS rule(s) and 1 script block(s)"));
    assert!(!stdout.contains("Changes applied successfully"));
    assert_eq!(fs::read_to_string(&index).unwrap(), PAGE);
}

#[test]
fn test_diff_shows_insertions() {
    let dir = TempDir::new().unwrap();
    let index = setup_page(dir.path());

    let output = patcher()
        .arg(&index)
        .args(["--dry-run", "--diff"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("(original)"));
    assert!(stdout.contains("(patched)"));
    assert!(stdout.contains("+      background: #f8f9fa;"));
    assert!(stdout.contains(r#"+        row.classList.add("older");"#));
}

#[test]
fn test_target_from_environment() {
    let dir = TempDir::new().unwrap();
    let index = setup_page(dir.path());

    let output = patcher()
        .env("HISTORY_PATCHER_TARGET", &index)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(fs::read_to_string(&index).unwrap().contains(".historyItem.older{"));
}

#[test]
fn test_default_target_relative_to_cwd() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    let index = setup_page(&docs);

    let output = patcher().current_dir(dir.path()).output().unwrap();

    assert!(output.status.success());
    assert!(fs::read_to_string(&index).unwrap().contains(".historyItem.older{"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.html");

    let output = patcher().arg(&missing).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
    assert!(stderr.contains("nope.html"));
    assert!(!stdout(&output).contains("Changes applied successfully"));
    assert!(!missing.exists());
}
