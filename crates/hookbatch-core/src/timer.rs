// Rust guideline compliant 2026-02-06

//! Duration timer and interval formatting.
//!
//! A batch run spans many host invocations, so the timer is anchored to a wall
//! clock start time that can be persisted and restored rather than to a
//! process-local `Instant`.

use chrono::{DateTime, Duration, Utc};

/// Wall-clock timer for one logical run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
    starts: u32,
    stops: u32,
}

impl Timer {
    /// Creates a timer that has not been started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a timer from persisted start and stop times.
    ///
    /// Restored times do not count toward [`Timer::start_count`] or
    /// [`Timer::stop_count`].
    pub fn resumed(started_at: DateTime<Utc>, stopped_at: Option<DateTime<Utc>>) -> Self {
        Self {
            started_at: Some(started_at),
            stopped_at,
            ..Self::default()
        }
    }

    /// Starts the timer at `now`.
    ///
    /// # Returns
    ///
    /// `true` if the timer started, `false` if it was already started.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        self.starts += 1;
        true
    }

    /// Stops the timer at `now`.
    ///
    /// # Returns
    ///
    /// The elapsed duration if this call stopped a running timer, `None` if
    /// the timer was never started or is already stopped.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Duration> {
        let started = self.started_at?;
        if self.stopped_at.is_some() {
            return None;
        }
        self.stopped_at = Some(now);
        self.stops += 1;
        Some(clamp(now - started))
    }

    /// Returns the elapsed time, measured to the stop time or to `now`.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(stop)) => clamp(stop - start),
            (Some(start), None) => clamp(now - start),
            _ => Duration::zero(),
        }
    }

    /// Returns true while the timer is started and not stopped.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Start time, if the timer has started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Stop time, if the timer has stopped.
    pub fn stopped_at(&self) -> Option<DateTime<Utc>> {
        self.stopped_at
    }

    /// Number of times [`Timer::start`] actually started this timer.
    pub fn start_count(&self) -> u32 {
        self.starts
    }

    /// Number of times [`Timer::stop`] actually stopped this timer.
    pub fn stop_count(&self) -> u32 {
        self.stops
    }
}

fn clamp(duration: Duration) -> Duration {
    if duration < Duration::zero() {
        Duration::zero()
    } else {
        duration
    }
}

const UNITS: [(&str, &str, i64); 7] = [
    ("year", "years", 31_536_000),
    ("month", "months", 2_592_000),
    ("week", "weeks", 604_800),
    ("day", "days", 86_400),
    ("hour", "hours", 3_600),
    ("min", "min", 60),
    ("sec", "sec", 1),
];

/// Formats a duration as a human-readable interval, e.g. `"1 hour 5 min"`.
///
/// At most two non-zero units are shown. Anything under one second is `"0 sec"`.
///
/// # Arguments
///
/// * `duration` - Interval to format; negative values are treated as zero
///
/// # Returns
///
/// The formatted interval.
pub fn format_interval(duration: Duration) -> String {
    let mut remaining = duration.num_seconds().max(0);
    let mut parts = Vec::new();

    for (singular, plural, seconds) in UNITS {
        if parts.len() == 2 {
            break;
        }
        if remaining >= seconds {
            let count = remaining / seconds;
            remaining %= seconds;
            let unit = if count == 1 { singular } else { plural };
            parts.push(format!("{count} {unit}"));
        }
    }

    if parts.is_empty() {
        "0 sec".to_string()
    } else {
        parts.join(" ")
    }
}
