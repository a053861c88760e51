// Rust guideline compliant 2026-02-06

//! hookbatch Core Library
//!
//! Resumable, chunked processing for update routines that a host re-invokes
//! until they report completion:
//! - Batch controller (seeding, bounded slices, progress, completion)
//! - Progress record persisted by the host between invocations
//! - Per-invocation run registry
//! - Duration timer and interval formatting
//! - Log sink seam backed by `tracing`
//! - File-backed record store and re-invocation driver
//! - Configuration and error types

pub mod batch;
pub mod config;
pub mod driver;
pub mod error;
pub mod log;
pub mod record;
pub mod registry;
pub mod store;
pub mod timer;

pub use batch::{percentage, BatchController, BatchState, RunReport, DEFAULT_PER_RUN_LIMIT};
pub use config::BatchConfig;
pub use driver::{DriveSummary, UpdateDriver};
pub use error::{Error, Result, WorkError};
pub use log::{LogSink, MemorySink, Severity, SharedSink, TracingSink};
pub use record::{ProgressRecord, RESERVED_KEYS};
pub use registry::RunRegistry;
pub use store::RecordStore;
pub use timer::{format_interval, Timer};
