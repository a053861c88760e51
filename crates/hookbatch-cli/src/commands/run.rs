// Rust guideline compliant 2026-02-06

//! Implementation of the `hookbatch run` command.
//!
//! Drives invocations back to back until the run reports finished.

use super::{Context, JobArgs};
use crate::output::{format_record_json, format_step_line};
use crate::routine::SliceJob;
use anyhow::Result;
use hookbatch_core::log::tracing_sink;
use hookbatch_core::DriveSummary;

/// Executes the run command.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier list cannot be read
/// - An invocation fails
/// - The run is not finished within the configured invocation ceiling
pub fn execute(ctx: &Context, args: &JobArgs) -> Result<DriveSummary> {
    let ids = args.source.load()?;
    let config = args.effective_config(&ctx.config)?;
    let job = SliceJob {
        run_id: &args.run_id,
        ids: &ids,
        work: &args.work,
        config: &config,
        sink: tracing_sink(),
    };

    let summary = ctx
        .driver()?
        .run_to_completion(&args.run_id, |record| job.invoke(record))?;

    if ctx.json {
        println!("{}", format_record_json(&args.run_id, &summary.record));
    } else {
        println!(
            "{} ({} invocations)",
            format_step_line(&args.run_id, &summary.record),
            summary.invocations
        );
    }
    Ok(summary)
}
