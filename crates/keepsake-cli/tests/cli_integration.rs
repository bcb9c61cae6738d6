//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn cli_cmd() -> Command {
    Command::cargo_bin("keepsake").expect("Failed to find keepsake binary")
}

/// Write `contents` to a config file inside `dir`
fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("site.json");
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// Elapsed Command Tests
// ============================================================================

#[test]
fn test_elapsed_at_fixed_moment() {
    cli_cmd()
        .args(["elapsed", "--at", "2023-04-05T01:02:03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Since 2023-04-04 00:00:00"))
        .stdout(predicate::str::contains("Days:    1"))
        .stdout(predicate::str::contains("Hours:   01"))
        .stdout(predicate::str::contains("Minutes: 02"))
        .stdout(predicate::str::contains("Seconds: 03"));
}

#[test]
fn test_elapsed_before_start_is_zero() {
    cli_cmd()
        .args(["elapsed", "--at", "2020-01-01 00:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Days:    0"))
        .stdout(predicate::str::contains("Seconds: 00"));
}

#[test]
fn test_elapsed_uses_config_start() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "counter": { "start": "2024-01-01T00:00:00" } }"#);

    cli_cmd()
        .arg("--config")
        .arg(&path)
        .args(["elapsed", "--at", "2024-01-11T00:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Since 2024-01-01 00:00:00"))
        .stdout(predicate::str::contains("Days:    10"));
}

#[test]
fn test_elapsed_rejects_bad_timestamp() {
    cli_cmd()
        .args(["elapsed", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp"));
}

// ============================================================================
// Pages / Render Command Tests
// ============================================================================

#[test]
fn test_pages_lists_every_page() {
    cli_cmd()
        .arg("pages")
        .assert()
        .success()
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("moments"))
        .stdout(predicate::str::contains("songs"))
        .stdout(predicate::str::contains("pop"))
        .stdout(predicate::str::contains("surprise"))
        .stdout(predicate::str::contains("reasons"));
}

#[test]
fn test_render_reasons_page() {
    cli_cmd()
        .args(["render", "--page", "reasons", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page: reasons"))
        .stdout(predicate::str::contains("particles"))
        .stdout(predicate::str::contains("tilt"))
        .stdout(predicate::str::contains("div#bg-particles"))
        .stdout(predicate::str::contains("div.reason-card"))
        .stdout(predicate::str::contains("div.card-glare"));
}

#[test]
fn test_render_is_reproducible_with_seed() {
    let args = [
        "render",
        "--page",
        "home",
        "--seed",
        "11",
        "--at",
        "2024-02-02T00:00:00",
    ];
    let first = stdout_of(cli_cmd().args(args));
    let second = stdout_of(cli_cmd().args(args));
    assert_eq!(first, second);
    assert_eq!(first.matches("div.particle").count(), 50);
}

#[test]
fn test_render_moments_counter_advances() {
    cli_cmd()
        .args([
            "render",
            "--page",
            "moments",
            "--seed",
            "1",
            "--at",
            "2023-04-05T00:00:00",
            "--advance-ms",
            "3000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("counter"))
        .stdout(predicate::str::contains("gallery"))
        .stdout(predicate::str::contains("span#days.countdown-value \"1\""))
        .stdout(predicate::str::contains("span#seconds.countdown-value \"03\""))
        .stdout(predicate::str::contains("Pending timers: 1"));
}

#[test]
fn test_render_unknown_page_fails() {
    cli_cmd()
        .args(["render", "--page", "guestbook"])
        .assert()
        .failure();
}

#[test]
fn test_render_with_particle_count_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "particles": { "count": 3 } }"#);

    let out = stdout_of(
        cli_cmd()
            .arg("--config")
            .arg(&path)
            .args(["render", "--page", "pop", "--seed", "3"]),
    );
    assert_eq!(out.matches("div.particle").count(), 3);
}

// ============================================================================
// Shuffle Command Tests
// ============================================================================

#[test]
fn test_shuffle_deals_every_card() {
    let out = stdout_of(cli_cmd().args(["shuffle", "--count", "5", "--seed", "42"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);

    let mut numbers: Vec<usize> = lines
        .iter()
        .map(|l| {
            let after = l.split("card").nth(1).unwrap();
            after.split_whitespace().next().unwrap().parse().unwrap()
        })
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    for line in &lines {
        let deg: f64 = line
            .split("rotate(")
            .nth(1)
            .and_then(|s| s.strip_suffix("deg)"))
            .unwrap()
            .parse()
            .unwrap();
        assert!((-5.0..=5.0).contains(&deg), "{}", line);
    }
}

#[test]
fn test_shuffle_same_seed_same_deal() {
    let first = stdout_of(cli_cmd().args(["shuffle", "-n", "8", "--seed", "9"]));
    let second = stdout_of(cli_cmd().args(["shuffle", "-n", "8", "--seed", "9"]));
    assert_eq!(first, second);
}

#[test]
fn test_shuffle_empty_gallery() {
    cli_cmd()
        .args(["shuffle", "--count", "0"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_check_config_accepts_partial_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "title": "Us, Always" }"#);

    cli_cmd()
        .arg("check-config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config OK"))
        .stdout(predicate::str::contains("Us, Always"))
        .stdout(predicate::str::contains("Popups:    8 messages"));
}

#[test]
fn test_check_config_rejects_bad_threshold() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "reveal": { "threshold": 2.0 } }"#);

    cli_cmd()
        .arg("check-config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("reveal.threshold"));
}

#[test]
fn test_check_config_rejects_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{ not json");

    cli_cmd()
        .arg("check-config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_check_config_missing_file() {
    let dir = TempDir::new().unwrap();

    cli_cmd()
        .arg("check-config")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure();
}
