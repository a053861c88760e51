// Rust guideline compliant 2026-02-06

//! Host-side re-invocation loop.
//!
//! The driver plays the part of the update mechanism: it loads the progress
//! record, calls the update routine once, persists the record, and repeats
//! until the record reports finished. Nothing but the record survives from
//! one invocation to the next.

use crate::{BatchConfig, Error, ProgressRecord, RecordStore, Result};
use serde::Serialize;

/// Summary of a driven run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriveSummary {
    /// Run identifier.
    pub run_id: String,
    /// Invocations performed by this drive.
    pub invocations: u32,
    /// Final state of the progress record.
    pub record: ProgressRecord,
}

/// Re-invokes update routines against a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct UpdateDriver {
    store: RecordStore,
    max_invocations: u32,
}

impl UpdateDriver {
    /// Creates a driver using `config.max_invocations` as its ceiling.
    pub fn new(store: RecordStore, config: &BatchConfig) -> Self {
        Self {
            store,
            max_invocations: config.max_invocations,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Performs one invocation of `routine` for `run_id`.
    ///
    /// The record is saved even when the routine fails, so work completed
    /// before the failure is not repeated.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Identifier of the logical run
    /// * `routine` - The update routine; receives the progress record
    ///
    /// # Returns
    ///
    /// The record as persisted after the invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record lock is held by another invocation
    /// - The record cannot be loaded or saved
    /// - The routine fails
    pub fn invoke_once<F>(&self, run_id: &str, routine: F) -> Result<ProgressRecord>
    where
        F: FnOnce(&mut ProgressRecord) -> Result<()>,
    {
        self.store.with_lock(run_id, || {
            let mut record = self.store.load(run_id)?;
            record.invocations += 1;
            tracing::debug!(run_id, invocation = record.invocations, "invoking update routine");

            let outcome = routine(&mut record);
            self.store.save(run_id, &record)?;
            outcome.map(|()| record)
        })
    }

    /// Invokes `routine` until the record reports finished.
    ///
    /// Each invocation calls `routine` afresh; any state it needs across
    /// invocations must live in the record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any invocation fails (see [`UpdateDriver::invoke_once`])
    /// - The run is not finished after `max_invocations` invocations
    ///   ([`Error::InvocationLimit`])
    pub fn run_to_completion<F>(&self, run_id: &str, mut routine: F) -> Result<DriveSummary>
    where
        F: FnMut(&mut ProgressRecord) -> Result<()>,
    {
        let mut invocations = 0;
        loop {
            if invocations == self.max_invocations {
                return Err(Error::InvocationLimit {
                    run_id: run_id.to_string(),
                    limit: self.max_invocations,
                });
            }

            let record = self.invoke_once(run_id, &mut routine)?;
            invocations += 1;

            if record.is_finished() {
                tracing::debug!(run_id, invocations, "run finished");
                return Ok(DriveSummary {
                    run_id: run_id.to_string(),
                    invocations,
                    record,
                });
            }
        }
    }
}
