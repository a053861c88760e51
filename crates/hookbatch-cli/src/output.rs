// Rust guideline compliant 2026-02-06

//! Output formatting for progress records.

use hookbatch_core::{format_interval, ProgressRecord};
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

/// Formats a record as a two-column table.
pub fn format_record_table(run_id: &str, record: &ProgressRecord) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["Field", "Value"]);

    builder.push_record(vec!["Run".to_string(), run_id.to_string()]);
    builder.push_record(vec!["State".to_string(), state_label(record).to_string()]);
    builder.push_record(vec![
        "Progress".to_string(),
        format!(
            "{} / {} ({:.2}%)",
            record.cursor,
            record
                .total
                .map_or_else(|| "?".to_string(), |total| total.to_string()),
            record.percentage()
        ),
    ]);
    builder.push_record(vec![
        "Invocations".to_string(),
        record.invocations.to_string(),
    ]);
    if let Some(started_at) = record.started_at {
        builder.push_record(vec!["Started".to_string(), started_at.to_rfc3339()]);
    }
    if let Some(finished_at) = record.finished_at {
        builder.push_record(vec!["Finished".to_string(), finished_at.to_rfc3339()]);
    }
    if let Some(elapsed_ms) = record.elapsed_ms {
        builder.push_record(vec![
            "Duration".to_string(),
            format_interval(chrono::Duration::milliseconds(elapsed_ms)),
        ]);
    }
    if let Some(message) = &record.message {
        builder.push_record(vec!["Last message".to_string(), message.clone()]);
    }
    for (key, value) in &record.extra {
        builder.push_record(vec![key.clone(), value.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

/// Formats a record as pretty JSON, tagged with its run id.
pub fn format_record_json(run_id: &str, record: &ProgressRecord) -> String {
    let output = json!({
        "run_id": run_id,
        "state": state_label(record),
        "record": record,
    });
    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|_| json!({ "error": "Failed to serialize record" }).to_string())
}

/// One-line summary printed after an invocation.
pub fn format_step_line(run_id: &str, record: &ProgressRecord) -> String {
    format!(
        "{}: {} of {} ({:.2}%) [{}]",
        run_id,
        record.cursor,
        record.total.unwrap_or(0),
        record.percentage(),
        state_label(record)
    )
}

/// Host-side view of where a run stands.
pub fn state_label(record: &ProgressRecord) -> &'static str {
    if record.is_finished() {
        "finished"
    } else if record.invocations == 0 {
        "not started"
    } else {
        "pending"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_label() {
        let mut record = ProgressRecord::new();
        assert_eq!(state_label(&record), "not started");
        record.invocations = 1;
        assert_eq!(state_label(&record), "pending");
        record.finished = 1.0;
        assert_eq!(state_label(&record), "finished");
    }

    #[test]
    fn test_table_contains_progress() {
        let record = ProgressRecord {
            finished: 0.4,
            cursor: 2,
            total: Some(5),
            invocations: 1,
            elapsed_ms: Some(65_000),
            ..ProgressRecord::default()
        };
        let table = format_record_table("demo", &record);
        assert!(table.contains("2 / 5 (40.00%)"));
        assert!(table.contains("1 min 5 sec"));
        assert!(table.contains("pending"));
    }

    #[test]
    fn test_json_output_is_valid() {
        let output = format_record_json("demo", &ProgressRecord::new());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["run_id"], "demo");
        assert_eq!(value["state"], "not started");
    }

    #[test]
    fn test_step_line() {
        let record = ProgressRecord {
            finished: 1.0,
            cursor: 3,
            total: Some(3),
            invocations: 2,
            ..ProgressRecord::default()
        };
        assert_eq!(format_step_line("demo", &record), "demo: 3 of 3 (100.00%) [finished]");
    }
}
