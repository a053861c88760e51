// Rust guideline compliant 2026-02-06

//! Unit tests for error types and messages.
//!
//! These tests validate error formatting and source chaining.

use hookbatch_core::{Error, WorkError};
use std::error::Error as _;

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = Error::from(io_err);
    assert!(error.to_string().starts_with("IO error"));
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
        .expect_err("Should fail to parse invalid JSON");
    let error = Error::from(json_err);
    assert!(error.to_string().starts_with("JSON error"));
}

#[test]
fn test_invalid_limit_formatting() {
    let error = Error::InvalidLimit(0);
    assert_eq!(
        error.to_string(),
        "Invalid per-run limit: 0 (must be greater than 0)"
    );
}

#[test]
fn test_not_seeded_formatting() {
    let error = Error::NotSeeded("terms_update".to_string());
    assert!(error.to_string().contains("terms_update"));
    assert!(error.to_string().contains("set_ids"));
}

#[test]
fn test_item_error_keeps_source() {
    let source: WorkError = "node 12 has no author".into();
    let error = Error::Item {
        run_id: "nodes".to_string(),
        item: "12".to_string(),
        source,
    };
    assert_eq!(
        error.to_string(),
        "Batch 'nodes' failed on item 12: node 12 has no author"
    );
    let inner = error.source().expect("Item error should expose its source");
    assert_eq!(inner.to_string(), "node 12 has no author");
}

#[test]
fn test_invocation_limit_formatting() {
    let error = Error::InvocationLimit {
        run_id: "slow".to_string(),
        limit: 3,
    };
    assert_eq!(error.to_string(), "Run 'slow' not finished after 3 invocations");
}

#[test]
fn test_locked_and_run_id_formatting() {
    assert!(Error::Locked("busy".to_string()).to_string().contains("busy"));
    assert_eq!(
        Error::InvalidRunId("../x".to_string()).to_string(),
        "Invalid run id: \"../x\""
    );
}
