// Rust guideline compliant 2026-02-06

//! Command implementations for the hookbatch CLI.

pub mod reset;
pub mod run;
pub mod status;
pub mod step;

use crate::ids::IdSource;
use crate::work::ExecWork;
use anyhow::Result;
use hookbatch_core::{BatchConfig, RecordStore, UpdateDriver};
use std::path::PathBuf;

/// Settings resolved from global flags and configuration.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory holding progress records.
    pub state_dir: PathBuf,
    /// Effective configuration.
    pub config: BatchConfig,
    /// Print machine-readable output.
    pub json: bool,
}

impl Context {
    /// Opens the record store under `state_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory path is empty.
    pub fn store(&self) -> Result<RecordStore> {
        Ok(RecordStore::new(self.state_dir.clone())?)
    }

    /// Builds a driver over the record store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn driver(&self) -> Result<UpdateDriver> {
        Ok(UpdateDriver::new(self.store()?, &self.config))
    }
}

/// Arguments shared by `step` and `run`.
#[derive(Debug, Clone)]
pub struct JobArgs {
    /// Identifier of the logical run.
    pub run_id: String,
    /// Where identifiers come from.
    pub source: IdSource,
    /// Command run per identifier.
    pub work: ExecWork,
    /// Per-run limit override.
    pub limit: Option<usize>,
}

impl JobArgs {
    /// Applies the per-run limit override to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override is zero.
    pub fn effective_config(&self, config: &BatchConfig) -> Result<BatchConfig> {
        let mut config = config.clone();
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(hookbatch_core::Error::InvalidLimit(limit).into());
            }
            config.per_run_limit = limit;
        }
        Ok(config)
    }
}
