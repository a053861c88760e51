// Rust guideline compliant 2026-02-06

//! Per-invocation registry of batch controllers.
//!
//! The registry is owned by the top-level handler of one host invocation and
//! handed to every call site that needs a controller. It guarantees at most
//! one controller per run id for its lifetime. It does not persist anything:
//! dropping it at the end of the invocation drops its controllers, and the
//! next invocation rebuilds them from the progress record.

use crate::batch::BatchController;
use crate::config::BatchConfig;
use crate::log::{SharedSink, Severity};
use crate::record::ProgressRecord;
use std::collections::HashMap;
use std::fmt::Display;

/// Mapping from run id to its live controller.
pub struct RunRegistry<T> {
    controllers: HashMap<String, BatchController<T>>,
    sink: SharedSink,
    per_run_limit: usize,
}

impl<T: Display> RunRegistry<T> {
    /// Creates an empty registry with default settings.
    pub fn new(sink: SharedSink) -> Self {
        Self::with_config(sink, &BatchConfig::default())
    }

    /// Creates an empty registry whose controllers use `config`.
    pub fn with_config(sink: SharedSink, config: &BatchConfig) -> Self {
        Self {
            controllers: HashMap::new(),
            sink,
            per_run_limit: config.per_run_limit,
        }
    }

    /// Returns the controller for `run_id`, resuming one from `record` if
    /// this registry has none yet.
    ///
    /// `record` is only read when the controller is created; later calls for
    /// the same run id return the existing controller unchanged.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Identifier of the logical run
    /// * `record` - Progress record for the run
    ///
    /// # Returns
    ///
    /// The single controller for `run_id`.
    pub fn controller(&mut self, run_id: &str, record: &ProgressRecord) -> &mut BatchController<T> {
        let sink = &self.sink;
        let per_run_limit = self.per_run_limit;
        self.controllers
            .entry(run_id.to_string())
            .or_insert_with(|| {
                let mut controller = BatchController::resume(run_id, record, sink.clone());
                // Config validation guarantees a positive limit.
                if controller.process_per_run(per_run_limit).is_err() {
                    sink.log(
                        &format!("{run_id}: ignoring invalid per-run limit {per_run_limit}"),
                        Severity::Warning,
                    );
                }
                controller
            })
    }

    /// Returns the controller for `run_id`, if one exists.
    pub fn get(&self, run_id: &str) -> Option<&BatchController<T>> {
        self.controllers.get(run_id)
    }

    /// Returns the controller for `run_id` mutably, if one exists.
    pub fn get_mut(&mut self, run_id: &str) -> Option<&mut BatchController<T>> {
        self.controllers.get_mut(run_id)
    }

    /// Returns true if a controller exists for `run_id`.
    pub fn contains(&self, run_id: &str) -> bool {
        self.controllers.contains_key(run_id)
    }

    /// Removes and returns the controller for `run_id`.
    pub fn remove(&mut self, run_id: &str) -> Option<BatchController<T>> {
        self.controllers.remove(run_id)
    }

    /// Number of live controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns true if the registry holds no controllers.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
