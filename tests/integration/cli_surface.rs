//! The `resgen` binary: exit codes, stdout summary and config flags

use super::test_utils::Fixture;
use std::fs;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn root_arg(fixture: &Fixture) -> String {
    fixture.root().to_string_lossy().into_owned()
}

#[test]
fn test_successful_run_prints_summary() {
    let fixture = Fixture::new();
    fixture.file("data/a.txt", "alpha").file("data/b.go", "package b");
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--dest", "out", "data"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("Snapshot written:"));
    assert!(stdout(&output).contains("Files: 1"));
    assert!(fixture.artifact().exists());
}

#[test]
fn test_json_summary() {
    let fixture = Fixture::new();
    fixture.file("data/a.txt", "alpha");
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--dest", "out", "--format", "json", "data"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["files"], 1);
    assert_eq!(value["identifier"], "out");
    assert_eq!(value["digest"].as_str().unwrap().len(), 64);
}

#[test]
fn test_missing_target_exits_with_error() {
    let fixture = Fixture::new();
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--dest", "out", "data"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Path does not exist"));
    assert!(!fixture.artifact().exists());
}

#[test]
fn test_missing_arguments_fail() {
    let fixture = Fixture::new();
    let output = fixture.resgen(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_unknown_flag_exits_with_one() {
    let fixture = Fixture::new();
    let output = fixture.resgen(&["data", "--no-such-flag"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_successfully() {
    let fixture = Fixture::new();
    let output = fixture.resgen(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("--dry-run"));
}

#[test]
fn test_dry_run_lists_entries_without_writing() {
    let fixture = Fixture::new();
    fixture
        .file("data/a.txt", "alpha")
        .file("data/sub/.vfsignore", "")
        .file("data/sub/c.txt", "c");
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--dest", "out", "--dry-run", "data"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("/a.txt (5 bytes)"));
    assert!(!out.contains("/sub/c.txt"));
    assert!(!fixture.artifact().exists());
}

#[test]
fn test_project_config_file_is_discovered() {
    let fixture = Fixture::new();
    fixture
        .file("data/a.txt", "alpha")
        .file("resgen.toml", "[output]\nfile_name = \"assets.rs\"\n");
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--dest", "out", "data"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(fixture.dest().join("assets.rs").exists());
    assert!(!fixture.artifact().exists());
}

#[test]
fn test_invalid_config_is_reported() {
    let fixture = Fixture::new();
    fixture
        .file("data/a.txt", "alpha")
        .file("bad.toml", "[rules]\nexcluded_prefixes = [\"bundle\"]\n");
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--config", "bad.toml", "data"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_print_config() {
    let fixture = Fixture::new();
    let root = root_arg(&fixture);

    let output = fixture.resgen(&["--root", &root, "--print-config"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let parsed: resgen::config::ResgenConfig = toml::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed, resgen::config::ResgenConfig::default());
}

#[test]
fn test_env_override_of_marker_file() {
    let fixture = Fixture::new();
    fixture
        .file("data/a.txt", "alpha")
        .file("data/sub/.skip", "")
        .file("data/sub/b.txt", "b");
    let root = root_arg(&fixture);

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_resgen"))
        .current_dir(fixture.root())
        .env("XDG_CONFIG_HOME", fixture.root().join(".xdg"))
        .env("RESGEN_RULES__MARKER_FILE", ".skip")
        .args(["--root", &root, "--dest", "out", "data"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(!fs::read_to_string(fixture.artifact())
        .unwrap()
        .contains("/sub/b.txt"));
}
