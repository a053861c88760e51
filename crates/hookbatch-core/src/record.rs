// Rust guideline compliant 2026-02-06

//! Progress record threaded through every invocation of one logical run.
//!
//! The host owns the record: it creates it before the first invocation,
//! persists it between invocations, and discards it once the run reports
//! finished. The batch controller only reads from and writes into it.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys written by the controller and the driver.
pub const RESERVED_KEYS: [&str; 9] = [
    "finished",
    "cursor",
    "total",
    "fingerprint",
    "started_at",
    "finished_at",
    "elapsed_ms",
    "invocations",
    "message",
];

/// Host-persisted state blob for one logical batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Completed fraction in `[0, 1]`; `1.0` once nothing remains.
    #[serde(default)]
    pub finished: f64,

    /// Number of identifiers consumed from the front of the full list.
    #[serde(default)]
    pub cursor: usize,

    /// Size of the identifier set last seeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    /// Digest of the identifier set the cursor refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// When the run was initialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the run reported finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Total wall-clock duration of the run in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<i64>,

    /// Number of host invocations that have touched this record.
    #[serde(default)]
    pub invocations: u32,

    /// Last progress message written by the controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Host-defined keys carried through untouched. Must not contain any of
    /// [`RESERVED_KEYS`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgressRecord {
    /// Creates an empty record for a run that has not started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the host should stop re-invoking the routine.
    pub fn is_finished(&self) -> bool {
        self.finished >= 1.0
    }

    /// Returns true once `initialize` has run for this logical run.
    pub fn is_initialized(&self) -> bool {
        self.started_at.is_some()
    }

    /// Completed percentage derived from the finished fraction.
    pub fn percentage(&self) -> f64 {
        round2(self.finished * 100.0)
    }

    /// Reads a host-defined key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Stores a host-defined key, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedKey`] if `key` names a typed field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(Error::ReservedKey(key));
        }
        Ok(self.extra.insert(key, value))
    }

    /// Checks that no host-defined key shadows a typed field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedKey`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        match self.extra.keys().find(|key| RESERVED_KEYS.contains(&key.as_str())) {
            Some(key) => Err(Error::ReservedKey(key.clone())),
            None => Ok(()),
        }
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
