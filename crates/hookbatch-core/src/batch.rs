// Rust guideline compliant 2026-02-06

//! Resumable, chunked batch controller.
//!
//! A host re-invokes an update routine until the routine reports completion
//! through its [`ProgressRecord`]. Within each invocation the routine builds a
//! [`BatchController`] from the record, re-seeds it with the full identifier
//! list, and calls [`BatchController::run`] to process the next slice. The
//! record carries the cursor, so every identifier is processed exactly once
//! across the whole logical run.
//!
//! The controller moves through these states:
//!
//! - `New` → `Initialized` (first [`BatchController::initialize`])
//! - `Initialized` → `Running` (a `run` call that leaves items queued)
//! - any → `Finished` (the queue becomes empty)
//!
//! `Finished` is terminal. Further `run` calls process nothing but still log
//! a 100% progress line.

use crate::error::{Error, Result, WorkError};
use crate::log::{SharedSink, Severity};
use crate::record::{round2, ProgressRecord};
use crate::timer::{format_interval, Timer};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::VecDeque;
use std::fmt::Display;

/// Default number of items consumed by a single `run` call.
pub const DEFAULT_PER_RUN_LIMIT: usize = 100;

/// Lifecycle state of a batch controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// Not yet initialized and nothing processed.
    New,
    /// Initialized, nothing processed yet.
    Initialized,
    /// At least one slice processed, items remain.
    Running,
    /// Seeded and no items remain.
    Finished,
}

/// Outcome of one `run` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunReport {
    /// Items processed by this call.
    pub processed_this_run: usize,
    /// Items processed over the logical run.
    pub processed: usize,
    /// Size of the identifier set.
    pub total: usize,
    /// Completed percentage rounded to two decimals.
    pub percentage: f64,
    /// Whether the queue is now empty.
    pub finished: bool,
}

/// Controller that processes a seeded identifier list in bounded slices.
pub struct BatchController<T> {
    run_id: String,
    remaining: VecDeque<T>,
    total: usize,
    processed: usize,
    per_run_limit: usize,
    initialized: bool,
    seeded: bool,
    completed: bool,
    timer: Timer,
    persisted_fingerprint: Option<String>,
    fingerprint: Option<String>,
    sink: SharedSink,
}

impl<T: Display> BatchController<T> {
    /// Creates a controller for a run that has no persisted progress.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Identifier of the logical run, conventionally the update
    ///   routine's name
    /// * `sink` - Destination for start, progress, and completion messages
    pub fn new(run_id: impl Into<String>, sink: SharedSink) -> Self {
        Self {
            run_id: run_id.into(),
            remaining: VecDeque::new(),
            total: 0,
            processed: 0,
            per_run_limit: DEFAULT_PER_RUN_LIMIT,
            initialized: false,
            seeded: false,
            completed: false,
            timer: Timer::new(),
            persisted_fingerprint: None,
            fingerprint: None,
            sink,
        }
    }

    /// Creates a controller that continues the run described by `record`.
    ///
    /// The cursor becomes the processed count, and a record that was already
    /// initialized yields an initialized controller whose timer keeps
    /// measuring from the persisted start time.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Identifier of the logical run
    /// * `record` - Progress record persisted by the host
    /// * `sink` - Destination for log messages
    pub fn resume(run_id: impl Into<String>, record: &ProgressRecord, sink: SharedSink) -> Self {
        let mut controller = Self::new(run_id, sink);
        controller.processed = record.cursor;
        controller.persisted_fingerprint = record.fingerprint.clone();
        if let Some(started_at) = record.started_at {
            controller.initialized = true;
            controller.timer = Timer::resumed(started_at, record.finished_at);
        }
        controller.completed = record.finished_at.is_some();
        controller
    }

    /// One-time start hook.
    ///
    /// The first call for a logical run logs `title`, starts the duration
    /// timer, stamps the record's start time, and returns `true` so the
    /// caller can perform its own one-time setup. Every later call returns
    /// `false` and does nothing.
    ///
    /// # Arguments
    ///
    /// * `record` - Progress record to stamp
    /// * `title` - Human-readable description of the run
    pub fn initialize(&mut self, record: &mut ProgressRecord, title: &str) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;

        let now = Utc::now();
        self.timer.start(now);
        record.started_at = Some(now);
        self.sink
            .log(&format!("{}: starting {}", self.run_id, title), Severity::Status);
        true
    }

    /// Seeds the work queue with the full identifier set.
    ///
    /// The processed count is kept, so the queue holds only the identifiers
    /// after the ones already consumed. If the persisted record describes a
    /// different identifier set, progress restarts from zero with a warning
    /// and the restarted run must be initialized again.
    /// An empty set yields a controller that is finished immediately.
    ///
    /// # Arguments
    ///
    /// * `ids` - Ordered identifiers; pass `[id]` for a single value
    ///
    /// # Returns
    ///
    /// The controller, for chaining.
    pub fn set_ids<I>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        let ids: Vec<T> = ids.into_iter().collect();
        let fingerprint = fingerprint(&ids);

        if let Some(previous) = self.persisted_fingerprint.take() {
            if previous != fingerprint && (self.processed > 0 || self.completed) {
                self.sink.log(
                    &format!(
                        "{}: identifier set changed since the last invocation; restarting from 0 of {}",
                        self.run_id,
                        ids.len()
                    ),
                    Severity::Warning,
                );
                self.processed = 0;
                self.completed = false;
                self.initialized = false;
                self.timer = Timer::new();
            }
        }

        self.total = ids.len();
        self.processed = self.processed.min(self.total);
        self.remaining = ids.into_iter().skip(self.processed).collect();
        self.fingerprint = Some(fingerprint);
        self.seeded = true;
        self
    }

    /// Sets the maximum number of items consumed by one `run` call.
    ///
    /// # Returns
    ///
    /// The controller, for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimit`] if `limit` is zero.
    pub fn process_per_run(&mut self, limit: usize) -> Result<&mut Self> {
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }
        self.per_run_limit = limit;
        Ok(self)
    }

    /// Processes the next slice of the queue.
    ///
    /// Up to `per_run_limit` identifiers are taken from the front of the
    /// queue in order and passed to `work`. Afterwards the progress record
    /// receives the cursor, the finished fraction, and the progress message.
    /// When the queue becomes empty the timer stops and a completion line is
    /// logged.
    ///
    /// # Arguments
    ///
    /// * `record` - Progress record to update
    /// * `work` - Called once per identifier
    ///
    /// # Returns
    ///
    /// A [`RunReport`] describing the slice.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The controller was never seeded ([`Error::NotSeeded`])
    /// - `work` fails ([`Error::Item`]). Items before the failing one stay
    ///   processed; the failing item and everything after it stay queued and
    ///   the record's cursor points at the failing item.
    pub fn run<F, E>(&mut self, record: &mut ProgressRecord, mut work: F) -> Result<RunReport>
    where
        F: FnMut(&T) -> std::result::Result<(), E>,
        E: Into<WorkError>,
    {
        if !self.seeded {
            return Err(Error::NotSeeded(self.run_id.clone()));
        }

        let mut done = 0;
        let mut failure = None;
        while done < self.per_run_limit {
            let Some(item) = self.remaining.front() else {
                break;
            };
            if let Err(err) = work(item) {
                failure = Some(Error::Item {
                    run_id: self.run_id.clone(),
                    item: item.to_string(),
                    source: err.into(),
                });
                break;
            }
            self.remaining.pop_front();
            done += 1;
        }

        self.processed += done;
        let report = self.report(done);
        self.write_record(record, &report);

        if let Some(err) = failure {
            self.sink.log(
                &format!(
                    "{}: aborted after {} of {} items: {}",
                    self.run_id, report.processed, report.total, err
                ),
                Severity::Error,
            );
            return Err(err);
        }

        self.sink.log(&progress_message(&self.run_id, &report), Severity::Status);

        if report.finished && !self.completed {
            self.complete(record);
        }

        Ok(report)
    }

    /// Returns true once the seeded queue is empty.
    pub fn is_finished(&self) -> bool {
        self.seeded && self.remaining.is_empty()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BatchState {
        if self.is_finished() {
            BatchState::Finished
        } else if self.processed > 0 {
            BatchState::Running
        } else if self.initialized {
            BatchState::Initialized
        } else {
            BatchState::New
        }
    }

    /// Identifier of the logical run.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Items processed over the logical run.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Size of the seeded identifier set.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Identifiers still queued, in processing order.
    pub fn remaining(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.remaining.iter()
    }

    /// Maximum items per `run` call.
    pub fn per_run_limit(&self) -> usize {
        self.per_run_limit
    }

    /// Returns true once `initialize` has run for this logical run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Duration timer of the run.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    fn report(&self, processed_this_run: usize) -> RunReport {
        RunReport {
            processed_this_run,
            processed: self.processed,
            total: self.total,
            percentage: percentage(self.processed, self.total),
            finished: self.is_finished(),
        }
    }

    fn write_record(&self, record: &mut ProgressRecord, report: &RunReport) {
        record.cursor = self.processed;
        record.total = Some(self.total);
        record.fingerprint = self.fingerprint.clone();
        record.finished = if report.finished {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        };
        record.message = Some(progress_message(&self.run_id, report));
        if !self.initialized {
            record.started_at = None;
        }
        if !self.completed {
            record.finished_at = None;
            record.elapsed_ms = None;
        }
    }

    fn complete(&mut self, record: &mut ProgressRecord) {
        self.completed = true;

        let now = Utc::now();
        let elapsed = self
            .timer
            .stop(now)
            .unwrap_or_else(|| self.timer.elapsed(now));
        record.finished_at = Some(now);
        record.elapsed_ms = Some(elapsed.num_milliseconds());

        self.sink.log(
            &format!(
                "{}: finished {} items in {}",
                self.run_id,
                self.total,
                format_interval(elapsed)
            ),
            Severity::Status,
        );
    }
}

/// Completed percentage, treating an empty set as fully done.
///
/// # Arguments
///
/// * `processed` - Items processed
/// * `total` - Size of the identifier set
///
/// # Returns
///
/// `processed / total * 100` rounded to two decimals, or `100.0` when
/// `total` is zero.
pub fn percentage(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    round2(processed as f64 / total as f64 * 100.0)
}

fn progress_message(run_id: &str, report: &RunReport) -> String {
    format!(
        "{}: processed {} of {} items ({:.2}%)",
        run_id, report.processed, report.total, report.percentage
    )
}

fn fingerprint<T: Display>(ids: &[T]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((ids.len() as u64).to_le_bytes());
    for id in ids {
        hasher.update(id.to_string().as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
