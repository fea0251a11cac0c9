use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn gen_podcast_cmd() -> Command {
    cargo_bin_cmd!("gen-podcast").into()
}

fn setup_test_config(temp_dir: &TempDir) -> PathBuf {
    let config_dir = temp_dir.path().join(".config").join("cli-programs");
    fs::create_dir_all(&config_dir).unwrap();
    config_dir
}

// ============================================================================
// CLI Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    gen_podcast_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gen-podcast"))
        .stdout(predicate::str::contains(
            "Generate an AI podcast episode from a topic",
        ));
}

#[test]
fn test_help_shows_options() {
    gen_podcast_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--length"))
        .stdout(predicate::str::contains("--key-points"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    gen_podcast_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gen-podcast"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_show_displays_defaults() {
    let temp_dir = TempDir::new().unwrap();

    gen_podcast_cmd()
        .args(["config", "show"])
        .env("HOME", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("script_model"))
        .stdout(predicate::str::contains("gpt-4o-mini"))
        .stdout(predicate::str::contains("tts-1"));
}

#[test]
fn test_config_show_reads_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = setup_test_config(&temp_dir);

    let config_path = config_dir.join("gen-podcast.toml");
    fs::write(&config_path, "output_dir = \"/srv/podcasts\"\n").unwrap();

    gen_podcast_cmd()
        .args(["config", "show"])
        .env("HOME", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/podcasts"));
}

#[test]
fn test_config_set_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = setup_test_config(&temp_dir);

    gen_podcast_cmd()
        .args(["config", "set", "script_model", "gpt-4.1-mini"])
        .env("HOME", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration updated"));

    // Verify the change was saved
    let content = fs::read_to_string(config_dir.join("gen-podcast.toml")).unwrap();
    assert!(content.contains("gpt-4.1-mini"));

    gen_podcast_cmd()
        .args(["config", "show"])
        .env("HOME", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-4.1-mini"));
}

#[test]
fn test_config_set_invalid_key() {
    let temp_dir = TempDir::new().unwrap();
    setup_test_config(&temp_dir);

    gen_podcast_cmd()
        .args(["config", "set", "invalid_key", "value"])
        .env("HOME", temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_handles_corrupted_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = setup_test_config(&temp_dir);

    let config_path = config_dir.join("gen-podcast.toml");
    fs::write(&config_path, "not valid toml [[[").unwrap();

    gen_podcast_cmd()
        .args(["config", "show"])
        .env("HOME", temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse").or(predicate::str::contains("Failed")));
}

// ============================================================================
// Input Handling Tests
// ============================================================================

#[test]
fn test_no_topic_fails() {
    let temp_dir = TempDir::new().unwrap();

    gen_podcast_cmd()
        .env("HOME", temp_dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No topic provided"));
}

#[test]
fn test_missing_api_key_fails() {
    let temp_dir = TempDir::new().unwrap();

    // Empty PATH keeps the 1Password CLI fallback from resolving
    gen_podcast_cmd()
        .args(["Rust", "--length", "short", "--key-points", "ownership"])
        .env("HOME", temp_dir.path())
        .env("PATH", "")
        .env_remove("OPENAI_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_unknown_subcommand() {
    gen_podcast_cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_config_set_requires_key_and_value() {
    let temp_dir = TempDir::new().unwrap();

    gen_podcast_cmd()
        .args(["config", "set"])
        .env("HOME", temp_dir.path())
        .assert()
        .failure();

    gen_podcast_cmd()
        .args(["config", "set", "script_model"])
        .env("HOME", temp_dir.path())
        .assert()
        .failure();
}
