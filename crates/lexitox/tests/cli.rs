//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn short_help_flag_shows_usage() {
    cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_version_flag_shows_version() {
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn info_json_contains_expected_fields() {
    cmd()
        .arg("info")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn info_help_shows_command_options() {
    cmd()
        .args(["info", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn quiet_flag_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
}

#[test]
fn short_quiet_flag_accepted() {
    cmd().args(["-q", "info"]).assert().success();
}

#[test]
fn verbose_flag_accepted() {
    cmd().args(["--verbose", "info"]).assert().success();
}

#[test]
fn short_verbose_flag_accepted() {
    cmd().args(["-v", "info"]).assert().success();
}

#[test]
fn multiple_verbose_flags_accepted() {
    cmd().args(["-vv", "info"]).assert().success();
}

#[test]
fn color_auto_accepted() {
    cmd().args(["--color", "auto", "info"]).assert().success();
}

#[test]
fn color_always_accepted() {
    cmd().args(["--color", "always", "info"]).assert().success();
}

#[test]
fn color_never_accepted() {
    cmd().args(["--color", "never", "info"]).assert().success();
}

// =============================================================================
// Fixtures
// =============================================================================

const STOPWORDS: &str = "the a an and are is i it to\n";
const DICTIONARY: &str = "# test dictionary\nstupid,MILD\nidiot,MODERATE\nhate you,SEVERE\n";
const TOXIC_TEXT: &str = "You are stupid. You are an idiot and I hate you.";
const CLEAN_TEXT: &str = "What a lovely day. The sun is warm and the sky is blue.";

/// A working directory holding the default stopword list and dictionary.
fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stopwords.txt"), STOPWORDS).unwrap();
    std::fs::write(dir.path().join("toxicwords.txt"), DICTIONARY).unwrap();
    dir
}

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) {
    std::fs::write(dir.path().join(name), contents).unwrap();
}

/// Command running inside `dir`.
fn cmd_in(dir: &tempfile::TempDir) -> Command {
    let mut c = cmd();
    c.args(["-C", dir.path().to_str().unwrap()]);
    c
}

fn stdout_json(output: &assert_cmd::assert::Assert) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn analyze_prints_full_report() {
    let dir = workspace();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["analyze", "toxic.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TEXT ANALYSIS REPORT"))
        .stdout(predicate::str::contains("Total words:         11"))
        .stdout(predicate::str::contains("TOXICITY ANALYSIS:"))
        .stdout(predicate::str::contains("Total toxic phrases: 3"))
        .stdout(predicate::str::contains("FREQUENCY CHART"))
        .stdout(predicate::str::contains("TOXICITY DISTRIBUTION"));
}

#[test]
fn analyze_no_charts_omits_charts() {
    let dir = workspace();
    write(&dir, "clean.txt", CLEAN_TEXT);
    cmd_in(&dir)
        .args(["analyze", "clean.txt", "--no-charts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No toxic content detected"))
        .stdout(predicate::str::contains("FREQUENCY CHART").not());
}

#[test]
fn analyze_json_outputs_result() {
    let dir = workspace();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    let output = cmd_in(&dir)
        .args(["analyze", "toxic.txt", "--json", "--sort", "merge"])
        .assert()
        .success();
    let json = stdout_json(&output);
    assert_eq!(json["word_count"], 11);
    assert_eq!(json["sentence_count"], 2);
    assert_eq!(json["sort_algorithm"], "merge");
    assert_eq!(json["toxicity_enabled"], true);
    assert_eq!(json["toxicity"]["toxic_phrase_count"], 3);
    assert_eq!(json["toxicity"]["risk"], "high");
}

#[test]
fn analyze_without_dictionary_skips_toxicity() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["analyze", "toxic.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toxicity detection skipped"))
        .stderr(predicate::str::contains("toxicity detection disabled"));
}

#[test]
fn analyze_csv_column() {
    let dir = workspace();
    write(&dir, "comments.csv", "id,comment\n1,\"you stupid fool\"\n2,nice work\n");
    let output = cmd_in(&dir)
        .args(["analyze", "comments.csv", "--column", "1", "--json"])
        .assert()
        .success();
    let json = stdout_json(&output);
    // "comment you stupid fool nice work"
    assert_eq!(json["word_count"], 6);
    assert_eq!(json["toxicity"]["toxic_phrase_count"], 1);
}

#[test]
fn analyze_several_files_skips_unreadable() {
    let dir = workspace();
    write(&dir, "a.txt", "first file here.");
    write(&dir, "b.txt", "second file here.");
    let output = cmd_in(&dir)
        .args(["analyze", "a.txt", "missing.txt", "b.txt", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped input file"));
    let json = stdout_json(&output);
    // Both "--- File: <name> ---" headers count as words too.
    assert!(json["word_count"].as_u64().unwrap() > 6);
}

#[test]
fn analyze_missing_file_fails() {
    let dir = workspace();
    cmd_in(&dir)
        .args(["analyze", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn analyze_unsupported_extension_fails() {
    let dir = workspace();
    write(&dir, "notes.md", "# Notes");
    cmd_in(&dir)
        .args(["analyze", "notes.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn analyze_respects_input_limit() {
    let dir = workspace();
    write(&dir, "lexitox.toml", "max_input_bytes = 10\n");
    write(&dir, "clean.txt", CLEAN_TEXT);
    cmd_in(&dir)
        .args(["analyze", "clean.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

// =============================================================================
// Top Command
// =============================================================================

#[test]
fn top_lists_ranked_words() {
    let dir = workspace();
    write(&dir, "fruit.txt", "apple banana apple cherry apple banana");
    cmd_in(&dir)
        .args(["top", "fruit.txt", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 words"))
        .stdout(predicate::str::contains("apple"))
        .stdout(predicate::str::contains("Coverage"));
}

#[test]
fn top_json_with_algorithm_comparison() {
    let dir = workspace();
    write(&dir, "fruit.txt", "apple banana apple cherry apple banana");
    let output = cmd_in(&dir)
        .args([
            "top",
            "fruit.txt",
            "-n",
            "2",
            "--sort",
            "bubble",
            "--compare-algorithms",
            "--json",
        ])
        .assert()
        .success();
    let json = stdout_json(&output);
    assert_eq!(json["algorithm"], "bubble");
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    assert_eq!(json["entries"][0]["word"], "apple");
    // Frequencies are all distinct, so every algorithm agrees.
    assert_eq!(json["algorithm_comparison"]["quick_vs_merge"], true);
}

#[test]
fn top_rejects_unknown_algorithm() {
    let dir = workspace();
    write(&dir, "fruit.txt", "apple");
    cmd_in(&dir)
        .args(["top", "fruit.txt", "--sort", "heap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Toxicity Command
// =============================================================================

#[test]
fn toxicity_lists_phrases() {
    let dir = workspace();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["toxicity", "toxic.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hate you [SEVERE]"))
        .stdout(predicate::str::contains("MOST FREQUENT TOXIC PHRASES"))
        .stdout(predicate::str::contains("HIGH RISK"));
}

#[test]
fn toxicity_max_score_fails_when_exceeded() {
    let dir = workspace();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["toxicity", "toxic.txt", "--max-score", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scores 46"));
}

#[test]
fn toxicity_max_score_passes_clean_text() {
    let dir = workspace();
    write(&dir, "clean.txt", CLEAN_TEXT);
    cmd_in(&dir)
        .args(["toxicity", "clean.txt", "--max-score", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS:"));
}

#[test]
fn toxicity_max_score_from_config() {
    let dir = workspace();
    write(&dir, ".lexitox.toml", "max_score = 5\n");
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["toxicity", "toxic.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max: 5"));
}

#[test]
fn toxicity_json_reports_over_max_and_fails() {
    let dir = workspace();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    let output = cmd_in(&dir)
        .args(["toxicity", "toxic.txt", "--max-score", "10", "--json"])
        .assert()
        .failure();
    let json = stdout_json(&output);
    assert_eq!(json["score"], 46);
    assert_eq!(json["over_max"], true);
}

#[test]
fn toxicity_gate_needs_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["toxicity", "toxic.txt", "--max-score", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no phrase dictionary"));
}

#[test]
fn toxicity_max_score_out_of_range_rejected() {
    cmd()
        .args(["toxicity", "any.txt", "--max-score", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("101"));
}

// =============================================================================
// Compare Command
// =============================================================================

#[test]
fn compare_prints_report() {
    let dir = workspace();
    write(&dir, "clean.txt", CLEAN_TEXT);
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["compare", "clean.txt", "toxic.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TEXT COMPARISON REPORT"))
        .stdout(predicate::str::contains(
            "toxic.txt shows significantly higher toxicity levels.",
        ));
}

#[test]
fn compare_writes_output_file() {
    let dir = workspace();
    write(&dir, "clean.txt", CLEAN_TEXT);
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["compare", "clean.txt", "toxic.txt", "-o", "cmp.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved:"));
    let saved = std::fs::read_to_string(dir.path().join("cmp.txt")).unwrap();
    assert!(saved.starts_with("TEXT COMPARISON REPORT"));
}

#[test]
fn compare_json_has_diffs() {
    let dir = workspace();
    write(&dir, "clean.txt", CLEAN_TEXT);
    write(&dir, "toxic.txt", TOXIC_TEXT);
    let output = cmd_in(&dir)
        .args(["compare", "clean.txt", "toxic.txt", "--json"])
        .assert()
        .success();
    let json = stdout_json(&output);
    assert_eq!(json["toxic_phrases"]["diff"], 3);
    assert_eq!(json["more_toxic"], "second");
    assert_eq!(json["second_sentiment"]["label"], "Negative");
}

// =============================================================================
// Export Command
// =============================================================================

#[test]
fn export_writes_bundle() {
    let dir = workspace();
    write(&dir, "toxic.txt", TOXIC_TEXT);
    cmd_in(&dir)
        .args(["export", "toxic.txt", "-o", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("report_full.txt"));

    for suffix in ["_analysis.csv", "_words.csv", "_toxicity.csv", "_full.txt"] {
        let path = dir.path().join(format!("report{suffix}"));
        assert!(path.is_file(), "missing {}", path.display());
    }
    let words = std::fs::read_to_string(dir.path().join("report_words.csv")).unwrap();
    assert!(words.starts_with("Rank,Word,Frequency,Percentage"));
}

#[test]
fn export_csv_only_skips_text_report() {
    let dir = workspace();
    write(&dir, "clean.txt", CLEAN_TEXT);
    let output = cmd_in(&dir)
        .args(["export", "clean.txt", "-o", "out", "--format", "csv", "--json"])
        .assert()
        .success();
    let json = stdout_json(&output);
    // No phrases matched, so no toxicity table either.
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert!(!dir.path().join("out_full.txt").exists());
    assert!(!dir.path().join("out_toxicity.csv").exists());
}

#[test]
fn export_format_from_config() {
    let dir = workspace();
    write(&dir, "lexitox.yaml", "report_format: text\n");
    write(&dir, "clean.txt", CLEAN_TEXT);
    cmd_in(&dir)
        .args(["export", "clean.txt", "-o", "out"])
        .assert()
        .success();
    assert!(dir.path().join("out_full.txt").exists());
    assert!(!dir.path().join("out_analysis.csv").exists());
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_flag_shows_error() {
    cmd()
        .arg("--not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Chdir Flag
// =============================================================================

#[test]
fn chdir_flag_changes_directory() {
    // The -C flag should be accepted and work without error
    // We use a path that definitely exists
    cmd().args(["-C", "/tmp", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}
