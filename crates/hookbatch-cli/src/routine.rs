// Rust guideline compliant 2026-02-06

//! The update routine the CLI hands to the driver.
//!
//! Each call is one invocation: a fresh registry, a controller resumed from
//! the record, the full identifier list re-seeded, and one slice processed.

use crate::work::ExecWork;
use hookbatch_core::log::SharedSink;
use hookbatch_core::{BatchConfig, ProgressRecord, Result, RunRegistry};

/// Inputs shared by every invocation of one CLI run.
pub struct SliceJob<'a> {
    /// Identifier of the logical run.
    pub run_id: &'a str,
    /// Full, ordered identifier list.
    pub ids: &'a [String],
    /// Command run once per identifier.
    pub work: &'a ExecWork,
    /// Settings for the controller.
    pub config: &'a BatchConfig,
    /// Destination for batch messages.
    pub sink: SharedSink,
}

impl SliceJob<'_> {
    /// Processes one slice, writing progress into `record`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails for an identifier.
    pub fn invoke(&self, record: &mut ProgressRecord) -> Result<()> {
        let mut registry: RunRegistry<String> =
            RunRegistry::with_config(self.sink.clone(), self.config);
        let batch = registry.controller(self.run_id, record);

        // Seed before initialize so a restarted run is initialized again.
        batch.set_ids(self.ids.iter().cloned());

        let title = format!("`{}` over {} items", self.work, self.ids.len());
        if batch.initialize(record, &title) {
            record.insert("command", serde_json::Value::String(self.work.to_string()))?;
        }

        batch.run(record, |id| self.work.call(id))?;
        Ok(())
    }
}
