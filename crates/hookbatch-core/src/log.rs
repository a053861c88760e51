// Rust guideline compliant 2026-02-06

//! Log sink abstraction for batch start, progress, and completion messages.
//!
//! The controller never writes to stdout directly. It hands every message to a
//! [`LogSink`], which by default forwards to `tracing`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a batch log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Something failed.
    Error,
    /// Routine progress information.
    Status,
    /// Unexpected but recoverable condition.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Status => "status",
            Severity::Warning => "warning",
        };
        f.write_str(label)
    }
}

/// Destination for batch log messages.
pub trait LogSink: Send + Sync {
    /// Records a message with the given severity.
    ///
    /// # Arguments
    ///
    /// * `message` - Human-readable message
    /// * `severity` - Message severity
    fn log(&self, message: &str, severity: Severity);
}

/// Shared handle to a log sink.
pub type SharedSink = Arc<dyn LogSink>;

/// Sink that forwards messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Status => tracing::info!(target: "hookbatch", "{message}"),
            Severity::Warning => tracing::warn!(target: "hookbatch", "{message}"),
            Severity::Error => tracing::error!(target: "hookbatch", "{message}"),
        }
    }
}

/// Sink that keeps messages in memory.
///
/// Cloning a `MemorySink` yields a handle to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded messages in order.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns only the message texts.
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, msg)| msg).collect()
    }

    /// Counts messages whose text contains `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.entries()
            .iter()
            .filter(|(_, msg)| msg.contains(needle))
            .count()
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str, severity: Severity) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((severity, message.to_string()));
    }
}

/// Returns the default tracing-backed sink.
pub fn tracing_sink() -> SharedSink {
    Arc::new(TracingSink)
}
