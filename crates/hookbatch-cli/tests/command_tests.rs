// Rust guideline compliant 2026-02-06

//! Integration tests for CLI commands.
//!
//! The per-identifier command is a small shell script that appends its
//! argument to a log file, so the tests can see exactly which identifiers
//! each invocation processed.

#![cfg(unix)]

use hookbatch_cli::{commands, Context, ExecWork, IdSource, JobArgs};
use hookbatch_core::{BatchConfig, Error};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a script that records each identifier, failing on `fail_on`.
fn write_recorder(dir: &Path, fail_on: Option<&str>) -> (PathBuf, PathBuf) {
    let log = dir.join("processed.log");
    let script = dir.join("record.sh");
    let fail_clause = match fail_on {
        Some(id) => format!("if [ \"$1\" = \"{id}\" ]; then exit 3; fi\n"),
        None => String::new(),
    };
    let body = format!(
        "#!/bin/sh\n{}echo \"$1\" >> \"{}\"\n",
        fail_clause,
        log.display()
    );
    fs::write(&script, body).expect("Failed to write script");
    (script, log)
}

fn processed(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn context(temp_dir: &TempDir) -> Context {
    Context {
        state_dir: temp_dir.path().join("state"),
        config: BatchConfig::default(),
        json: false,
    }
}

fn job(run_id: &str, source: IdSource, script: &Path, limit: usize) -> JobArgs {
    JobArgs {
        run_id: run_id.to_string(),
        source,
        work: ExecWork::parse(&format!("sh {}", script.display())).unwrap(),
        limit: Some(limit),
    }
}

#[test]
fn test_step_processes_one_slice_per_invocation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (script, log) = write_recorder(temp_dir.path(), None);
    let ctx = context(&temp_dir);
    let args = job("nodes", IdSource::Range(5), &script, 2);

    let record = commands::step::execute(&ctx, &args).unwrap();
    assert_eq!(record.cursor, 2);
    assert_eq!(processed(&log), vec!["1", "2"]);

    commands::step::execute(&ctx, &args).unwrap();
    let record = commands::step::execute(&ctx, &args).unwrap();
    assert!(record.is_finished());
    assert_eq!(record.invocations, 3);
    assert_eq!(processed(&log), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_run_drives_to_completion_from_ids_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (script, log) = write_recorder(temp_dir.path(), None);
    let ids_file = temp_dir.path().join("ids.txt");
    fs::write(&ids_file, "# terms\nalpha\nbeta\n\ngamma\ndelta\n").unwrap();

    let ctx = context(&temp_dir);
    let args = job("terms", IdSource::File(ids_file), &script, 3);

    let summary = commands::run::execute(&ctx, &args).unwrap();
    assert_eq!(summary.invocations, 2);
    assert!(summary.record.is_finished());
    assert_eq!(processed(&log), vec!["alpha", "beta", "gamma", "delta"]);
    assert!(summary.record.get("command").is_some());
}

#[test]
fn test_failed_item_is_retried_on_next_invocation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (failing, log) = write_recorder(temp_dir.path(), Some("3"));
    let ctx = context(&temp_dir);

    let result = commands::step::execute(&ctx, &job("retry", IdSource::Range(4), &failing, 10));
    let err = result.expect_err("Item 3 should fail");
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Item { item, .. }) if item == "3"
    ));
    assert_eq!(processed(&log), vec!["1", "2"]);

    let (fixed, log) = write_recorder(temp_dir.path(), None);
    let record =
        commands::step::execute(&ctx, &job("retry", IdSource::Range(4), &fixed, 10)).unwrap();
    assert!(record.is_finished());
    assert_eq!(processed(&log), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_zero_limit_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (script, _log) = write_recorder(temp_dir.path(), None);
    let ctx = context(&temp_dir);

    let err = commands::step::execute(&ctx, &job("zero", IdSource::Range(3), &script, 0))
        .expect_err("Zero limit should be rejected");
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidLimit(0))));
}

#[test]
fn test_status_and_reset() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (script, _log) = write_recorder(temp_dir.path(), None);
    let ctx = context(&temp_dir);

    commands::step::execute(&ctx, &job("cleanup", IdSource::Range(4), &script, 1)).unwrap();
    commands::status::execute(&ctx, "cleanup").unwrap();

    assert!(commands::reset::execute(&ctx, "cleanup").unwrap());
    assert!(!commands::reset::execute(&ctx, "cleanup").unwrap());
    assert!(!ctx.state_dir.join("cleanup.lock").exists());

    let record = ctx.store().unwrap().load("cleanup").unwrap();
    assert_eq!(record.cursor, 0);
    assert_eq!(record.invocations, 0);
}

#[test]
fn test_changed_range_after_finish_starts_a_new_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (script, log) = write_recorder(temp_dir.path(), None);
    let ctx = context(&temp_dir);

    let record = commands::step::execute(&ctx, &job("grow", IdSource::Range(2), &script, 5)).unwrap();
    assert!(record.is_finished());

    let record = commands::step::execute(&ctx, &job("grow", IdSource::Range(3), &script, 1)).unwrap();
    assert!(!record.is_finished());
    assert!(record.is_initialized());
    assert!(record.finished_at.is_none());
    assert_eq!(record.cursor, 1);
    assert_eq!(processed(&log), vec!["1", "2", "1"]);
}
