//! End-to-end runs of `shapematch check` and `shapematch test`.
//!
//! `check` tests write a value/signature pair into a temp dir and assert on
//! the exit code (0 match, 1 mismatch, 2 error) and the rendered report.
//! `test` runs start in the workspace root, where `conformance/` is the
//! default suite.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    // This crate lives at crates/cli.
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root")
        .to_path_buf()
}

fn shapematch() -> Command {
    let mut cmd = cargo_bin_cmd!("shapematch");
    cmd.current_dir(workspace_root());
    cmd
}

/// Writes `value.json` and `signature.json` into a fresh temp dir.
fn pair(value: &str, signature: &str) -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let v = tmp.path().join("value.json");
    let s = tmp.path().join("signature.json");
    fs::write(&v, value).unwrap();
    fs::write(&s, signature).unwrap();
    (tmp, v, s)
}

fn arg(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    shapematch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Structural shape matching for JSON data",
        ));
}

#[test]
fn version_exits_0() {
    shapematch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shapematch"));
}

// ──────────────────────────────────────────────
// 2. Check subcommand
// ──────────────────────────────────────────────

#[test]
fn check_matching_subset_exits_0() {
    let (_tmp, v, s) = pair(
        r#"{"vue": "1", "limit": 100, "offset": "0", "ordering": "-size"}"#,
        r#"{"limit": 100, "offset": {"$match": "any"}}"#,
    );
    shapematch()
        .args(["check", arg(&v), arg(&s)])
        .assert()
        .success()
        .stdout(predicate::str::diff("match\n"));
}

#[test]
fn check_mismatch_exits_1_with_path() {
    let (_tmp, v, s) = pair(
        r#"{"a": {"x": 1}, "b": 2}"#,
        r#"{"a": {"x": 2}, "b": 2}"#,
    );
    shapematch()
        .args(["check", arg(&v), arg(&s)])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "mismatch: $.a.x: expected 2, found 1",
        ));
}

#[test]
fn check_quiet_prints_nothing() {
    let (_tmp, v, s) = pair(r#"[1, 2, 3]"#, r#"[1, 2]"#);
    shapematch()
        .args(["--quiet", "check", arg(&v), arg(&s)])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_json_output() {
    let (_tmp, v, s) = pair(r#"{"value": null}"#, r#"{"value": {"$match": "absent"}}"#);
    let out = shapematch()
        .args(["--output", "json", "check", arg(&v), arg(&s)])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["matches"], false);
    assert_eq!(json["mismatch"]["path"], "$.value");
    assert_eq!(json["mismatch"]["reason"], "expected undefined, found null");
}

#[test]
fn check_json_output_on_match() {
    let (_tmp, v, s) = pair(r#"{"a": 1}"#, r#"{}"#);
    let out = shapematch()
        .args(["--output", "json", "check", arg(&v), arg(&s)])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json, serde_json::json!({"matches": true, "mismatch": null}));
}

#[test]
fn check_missing_file_exits_2() {
    shapematch()
        .args(["check", "nonexistent_value.json", "nonexistent_sig.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read nonexistent_value.json"));
}

#[test]
fn check_invalid_json_exits_2() {
    let (_tmp, v, s) = pair("{not json", "{}");
    shapematch()
        .args(["check", arg(&v), arg(&s)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn check_wildcard_in_value_exits_2() {
    let (_tmp, v, s) = pair(r#"{"a": {"$match": "any"}}"#, "{}");
    shapematch()
        .args(["check", arg(&v), arg(&s)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "wildcard is only allowed in signatures",
        ));
}

#[test]
fn check_error_as_json_on_stderr() {
    let (_tmp, v, s) = pair("{}", r#"{"a": {"$match": "nope"}}"#);
    let out = shapematch()
        .args(["--output", "json", "check", arg(&v), arg(&s)])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("unknown directive 'nope' at $.a"));
}

// ──────────────────────────────────────────────
// 3. Configuration
// ──────────────────────────────────────────────

#[test]
fn config_depth_limit_exits_2() {
    let (tmp, v, s) = pair(
        r#"{"a": {"b": {"c": 1}}}"#,
        r#"{"a": {"b": {"c": 1}}}"#,
    );
    let cfg = tmp.path().join("shapematch.toml");
    fs::write(&cfg, "[matcher]\nmax_depth = 2\n").unwrap();
    shapematch()
        .args(["--config", arg(&cfg), "check", arg(&v), arg(&s)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("depth limit 2 at $.a.b.c"));
}

#[test]
fn config_directive_key_is_used() {
    let (tmp, v, s) = pair(r#"{"a": 1}"#, r#"{"a": {"@": "any"}}"#);
    let cfg = tmp.path().join("shapematch.toml");
    fs::write(&cfg, "[json]\ndirective_key = \"@\"\n").unwrap();
    shapematch()
        .args(["--config", arg(&cfg), "check", arg(&v), arg(&s)])
        .assert()
        .success();
}

#[test]
fn config_discovered_in_current_dir() {
    let (tmp, v, s) = pair(r#"{"a": 1}"#, r#"{"a": {"@": "any"}}"#);
    fs::write(
        tmp.path().join("shapematch.toml"),
        "[json]\ndirective_key = \"@\"\n",
    )
    .unwrap();
    cargo_bin_cmd!("shapematch")
        .current_dir(tmp.path())
        .args(["check", arg(&v), arg(&s)])
        .assert()
        .success();
}

#[test]
fn invalid_config_exits_2() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("bad.toml");
    fs::write(&cfg, "[matcher]\nmax_depth = \"deep\"\n").unwrap();
    shapematch()
        .args(["--config", arg(&cfg), "test"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("could not parse"));
}

// ──────────────────────────────────────────────
// 4. Test subcommand
// ──────────────────────────────────────────────

#[test]
fn test_conformance_exits_0() {
    shapematch()
        .args(["test", "conformance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TAP version 14"))
        .stdout(predicate::str::contains("# fail  0"))
        .stdout(predicate::str::contains("not ok").not());
}

#[test]
fn test_default_suite_dir() {
    shapematch()
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok 1 - "));
}

#[test]
fn test_failing_case_exits_1() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("lists")).unwrap();
    fs::write(
        tmp.path().join("lists").join("wrong.case.json"),
        r#"{"value": [1, 2, 3], "signature": [1, 2], "expected": true}"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("right.case.json"),
        r#"{"value": [1, 2, 3], "signature": [1, 2], "expected": false}"#,
    )
    .unwrap();
    shapematch()
        .args(["test", arg(tmp.path())])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not ok 1 - lists/wrong"))
        .stdout(predicate::str::contains(
            "# $: expected list of length 2, found length 3",
        ))
        .stdout(predicate::str::contains("ok 2 - right"));
}

#[test]
fn test_malformed_case_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("bad.case.json"),
        r#"{"value": 1, "signature": 1, "expected": "yes"}"#,
    )
    .unwrap();
    shapematch()
        .args(["test", arg(tmp.path())])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not ok 1 - bad"))
        .stdout(predicate::str::contains("malformed case"));
}

#[test]
fn test_empty_suite_exits_2() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("unused")).unwrap();
    shapematch()
        .args(["test", arg(tmp.path())])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no *.case.json files found"));
}

#[test]
fn test_missing_suite_dir_exits_2() {
    shapematch()
        .args(["test", "no_such_suite_dir"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("suite directory not found"));
}
