//! Conformance suite runner.
//!
//! Every `*.case.json` file below the suite directory is one case:
//!
//! ```json
//! {
//!   "description": "optional",
//!   "value": {"a": 1, "b": 2},
//!   "signature": {"a": {"$match": "any"}},
//!   "expected": true,
//!   "mismatch_path": "$.a"
//! }
//! ```
//!
//! `mismatch_path`, when present, must equal the rendered path of the
//! reported mismatch. Cases run in sorted path order and are named by
//! their path relative to the suite directory.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value as Json;
use shapematch_core::{DirectiveReader, Matcher};

use crate::config::Config;
use crate::tap::Tap;

const CASE_SUFFIX: &str = ".case.json";

static CASE_SCHEMA_STR: &str = include_str!("../../../docs/case-schema.json");

pub struct RunResult {
    pub failed: usize,
}

pub fn run_suite(suite_dir: &Path, config: &Config) -> Result<RunResult, String> {
    if !suite_dir.is_dir() {
        return Err(format!(
            "suite directory not found: {}",
            suite_dir.display()
        ));
    }

    let schema: Json = serde_json::from_str(CASE_SCHEMA_STR)
        .map_err(|e| format!("internal error: failed to parse embedded case schema: {}", e))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| format!("internal error: failed to compile case schema: {}", e))?;

    let mut cases = Vec::new();
    collect_cases(suite_dir, &mut cases)
        .map_err(|e| format!("cannot read suite directory: {}", e))?;
    if cases.is_empty() {
        return Err(format!(
            "no *{} files found in {}",
            CASE_SUFFIX,
            suite_dir.display()
        ));
    }
    cases.sort();

    let matcher = config.matcher();
    let reader = config.reader();
    let mut tap = Tap::new();

    for path in &cases {
        let name = case_name(suite_dir, path);
        let doc = match read_json(path) {
            Ok(doc) => doc,
            Err(e) => {
                tap.not_ok(&name, e);
                continue;
            }
        };
        let errors: Vec<String> = validator
            .iter_errors(&doc)
            .map(|e| format!("{}", e))
            .collect();
        if !errors.is_empty() {
            tap.not_ok(&name, format!("malformed case:\n{}", errors.join("\n")));
            continue;
        }
        match run_case(&doc, &matcher, &reader) {
            Ok(()) => tap.ok(&name),
            Err(diag) => tap.not_ok(&name, diag),
        }
    }

    let failed = tap.failure_count();
    tap.write_to(&mut io::stdout().lock())
        .map_err(|e| format!("error writing report: {}", e))?;
    Ok(RunResult { failed })
}

/// Runs one schema-valid case. `Err` carries the TAP diagnostics.
fn run_case(doc: &Json, matcher: &Matcher, reader: &DirectiveReader) -> Result<(), String> {
    let value = reader
        .read_value(&doc["value"])
        .map_err(|e| format!("invalid value: {}", e))?;
    let signature = reader
        .read_signature(&doc["signature"])
        .map_err(|e| format!("invalid signature: {}", e))?;
    let expected = doc["expected"].as_bool().unwrap_or_default();

    let outcome = matcher
        .explain(&value, &signature)
        .map_err(|e| format!("match error: {}", e))?;

    match (&outcome, expected) {
        (None, true) => Ok(()),
        (Some(m), true) => Err(format!("expected match, got mismatch\n{}", m)),
        (None, false) => Err("expected mismatch, got match".to_string()),
        (Some(m), false) => match doc.get("mismatch_path").and_then(Json::as_str) {
            Some(want) if want != m.path.to_string() => Err(format!(
                "mismatch reported at wrong path\nexpected {}\ngot {}",
                want, m
            )),
            _ => Ok(()),
        },
    }
}

fn collect_cases(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir).map_err(|e| format!("{}: {}", dir.display(), e))?;
    for entry in entries {
        let path = entry.map_err(|e| format!("{}: {}", dir.display(), e))?.path();
        if path.is_dir() {
            collect_cases(&path, out)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(CASE_SUFFIX))
        {
            out.push(path);
        }
    }
    Ok(())
}

fn case_name(suite_dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(suite_dir).unwrap_or(path);
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    rel.strip_suffix(CASE_SUFFIX).unwrap_or(&rel).to_string()
}

fn read_json(path: &Path) -> Result<Json, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&src).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(doc: Json) -> Result<(), String> {
        run_case(&doc, &Matcher::new(), &DirectiveReader::default())
    }

    #[test]
    fn passing_cases() {
        assert_eq!(
            run(json!({"value": {"a": 1, "b": 2}, "signature": {"a": 1}, "expected": true})),
            Ok(())
        );
        assert_eq!(
            run(json!({
                "value": {"a": 1},
                "signature": {"a": 2},
                "expected": false,
                "mismatch_path": "$.a"
            })),
            Ok(())
        );
    }

    #[test]
    fn wrong_expectation_is_reported() {
        let err = run(json!({"value": [1], "signature": [2], "expected": true})).unwrap_err();
        assert_eq!(err, "expected match, got mismatch\n$[0]: expected 2, found 1");
        let err = run(json!({"value": [1], "signature": [1], "expected": false})).unwrap_err();
        assert_eq!(err, "expected mismatch, got match");
    }

    #[test]
    fn wrong_mismatch_path_is_reported() {
        let err = run(json!({
            "value": {"a": {"x": 1}},
            "signature": {"a": {"x": 2}},
            "expected": false,
            "mismatch_path": "$.a"
        }))
        .unwrap_err();
        assert!(err.starts_with("mismatch reported at wrong path\nexpected $.a\ngot $.a.x"));
    }

    #[test]
    fn conversion_errors_fail_the_case() {
        let err = run(json!({
            "value": {"$match": "any"},
            "signature": 1,
            "expected": false
        }))
        .unwrap_err();
        assert!(err.starts_with("invalid value:"));
    }

    #[test]
    fn cases_are_collected_recursively() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("lists")).unwrap();
        std::fs::write(tmp.path().join("lists").join("a.case.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("notes.json"), "{}").unwrap();
        let mut cases = Vec::new();
        collect_cases(tmp.path(), &mut cases).unwrap();
        assert_eq!(cases, vec![tmp.path().join("lists").join("a.case.json")]);
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut cases = Vec::new();
        let err = collect_cases(&tmp.path().join("gone"), &mut cases).unwrap_err();
        assert!(err.contains("gone"));
    }

    #[test]
    fn empty_suite_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("empty")).unwrap();
        let err = run_suite(tmp.path(), &Config::default()).err().unwrap();
        assert!(err.starts_with("no *.case.json files found in"));
    }

    #[test]
    fn names_are_relative_without_suffix() {
        let suite = Path::new("conformance");
        let path = suite.join("lists").join("exact.case.json");
        assert_eq!(case_name(suite, &path), "lists/exact");
    }
}
