// Rust guideline compliant 2026-02-06

//! hookbatch CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod ids;
pub mod logging;
pub mod output;
pub mod routine;
pub mod work;

pub use commands::{Context, JobArgs};
pub use ids::IdSource;
pub use work::ExecWork;
