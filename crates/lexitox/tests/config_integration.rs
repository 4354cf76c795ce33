//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["log_level"], "info",
        "should use default log level"
    );
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join(".lexitox.toml");
    fs::write(&config_path, r#"log_level = "debug""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".lexitox.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_regular_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("lexitox.toml");
    fs::write(&config_path, r#"log_level = "warn""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "warn");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("lexitox.toml"),
        "should report regular config: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("nested").join("deep");
    fs::create_dir_all(&sub_dir).unwrap();

    // Config in root, run from nested/deep
    fs::write(tmp.path().join(".lexitox.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["log_level"], "debug");
    assert!(
        json["config"]["config_file"].as_str().is_some(),
        "should find parent config"
    );
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();

    // Both configs exist; the regular file (higher precedence) should win
    fs::write(tmp.path().join(".lexitox.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join("lexitox.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["log_level"], "error",
        "regular file should override dotfile"
    );
}

// =============================================================================
// Config Format Parsing
// =============================================================================

#[test]
fn parses_toml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".lexitox.toml"),
        "log_level = \"warn\"\nstopwords_file = \"stop.txt\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("stop.txt"), "the a an\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
    assert_eq!(json["config"]["stopwords_file"], "stop.txt");
    assert_eq!(json["config"]["stopwords_found"], true);
}

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".lexitox.yaml"), "sort_algorithm: merge\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["sort_algorithm"], "merge");
}

#[test]
fn parses_yml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".lexitox.yml"), "top_words: 3\nshow_charts: false\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["top_words"], 3);
    assert_eq!(json["config"]["show_charts"], false);
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".lexitox.json"),
        r#"{"log_level": "error", "top_words": 7}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "error");
    assert_eq!(json["config"]["top_words"], 7);
}

#[test]
fn analysis_settings_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("lexitox.toml"),
        "sort_algorithm = \"bubble\"\nshow_charts = false\nreport_format = \"csv\"\nmax_score = 30\ndictionary_file = \"lists/toxic.txt\"\n",
    )
    .unwrap();
    fs::create_dir(tmp.path().join("lists")).unwrap();
    fs::write(tmp.path().join("lists").join("toxic.txt"), "stupid,MILD\n").unwrap();

    let json = info_json(tmp.path());
    let config = &json["config"];
    assert_eq!(config["sort_algorithm"], "bubble");
    assert_eq!(config["show_charts"], false);
    assert_eq!(config["report_format"], "csv");
    assert_eq!(config["max_score"], 30);
    assert_eq!(config["dictionary_file"], "lists/toxic.txt");
    assert_eq!(config["dictionary_found"], true);
    assert_eq!(config["stopwords_found"], false);
}

#[test]
fn defaults_reported_without_config() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());
    let config = &json["config"];
    assert_eq!(config["sort_algorithm"], "quick");
    assert_eq!(config["top_words"], 20);
    assert_eq!(config["report_format"], "both");
    assert_eq!(config["max_input_bytes"], 5 * 1024 * 1024);
}

// =============================================================================
// Config Precedence
// =============================================================================

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("project");
    fs::create_dir_all(&sub_dir).unwrap();

    // Parent config (bubble) vs child config (merge): child should win
    fs::write(tmp.path().join(".lexitox.toml"), r#"sort_algorithm = "bubble""#).unwrap();
    fs::write(sub_dir.join(".lexitox.toml"), r#"sort_algorithm = "merge""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(
        json["config"]["sort_algorithm"], "merge",
        "closer config should win"
    );
}

#[test]
fn later_extension_overrides_earlier_in_same_directory() {
    let tmp = TempDir::new().unwrap();

    // Both dotfiles exist. YAML comes after TOML in merge order, so it wins
    fs::write(tmp.path().join(".lexitox.toml"), "top_words = 5\nmax_score = 40\n").unwrap();
    fs::write(tmp.path().join(".lexitox.yaml"), "top_words: 8\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(
        json["config"]["top_words"], 8,
        "later extension (YAML) should override earlier (TOML) in merge"
    );
    assert_eq!(json["config"]["max_score"], 40, "non-conflicting keys merge");
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();

    // Project config sets debug
    fs::write(tmp.path().join(".lexitox.toml"), r#"log_level = "debug""#).unwrap();

    // Explicit config sets error
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["config"]["log_level"], "error",
        "--config should override discovered config"
    );
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("override.toml"),
        "--config path should be reported: {reported}"
    );
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".lexitox.toml"), "sort_algorithm = \"bubble\"\n").unwrap();

    let output = cmd()
        .env("LEXITOX_SORT_ALGORITHM", "merge")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["sort_algorithm"], "merge");
}

#[test]
fn disable_input_limit_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".lexitox.toml"), "disable_input_limit = true\n").unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".lexitox.toml"),
        "this is not valid toml [[[",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration").or(predicate::str::contains("config")));
}

#[test]
fn invalid_yaml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".lexitox.yaml"),
        "invalid:\n  yaml\n content:\n[broken",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn invalid_json_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".lexitox.json"), "{not valid json}").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn invalid_sort_algorithm_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".lexitox.toml"), "sort_algorithm = \"heap\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn unknown_config_field_is_ignored() {
    // Figment ignores unknown fields by default with serde
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".lexitox.toml"),
        "log_level = \"info\"\nunknown_field = \"should be ignored\"\nanother_unknown = 42\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "info");
}

// =============================================================================
// Boundary Marker Tests
// =============================================================================

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();

    // Structure: parent/.lexitox.toml + parent/repo/.git/ + parent/repo/src/
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();

    // Config in parent (outside repo)
    fs::write(parent.join(".lexitox.toml"), r#"log_level = "error""#).unwrap();

    // .git directory marks repo boundary
    fs::create_dir(repo.join(".git")).unwrap();

    // Running from src/ should NOT find parent config (stopped at .git)
    let json = info_json(&src);

    assert_eq!(
        json["config"]["log_level"], "info",
        "boundary stops search, default applies"
    );
    assert!(
        json["config"]["config_file"].is_null(),
        "should not find config beyond boundary"
    );
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();

    // .git and config in same directory
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".lexitox.toml"), r#"log_level = "debug""#).unwrap();

    // Running from src/ should find the repo config
    let json = info_json(&src);

    assert_eq!(
        json["config"]["log_level"], "debug",
        "config next to .git should be found"
    );
    assert!(
        json["config"]["config_file"].as_str().is_some(),
        "should report config file"
    );
}
