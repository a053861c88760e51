// Rust guideline compliant 2026-02-06

//! Implementation of the `hookbatch step` command.
//!
//! Performs exactly one invocation: one slice of the run. Schedulers that
//! re-invoke the tool until it reports finished use this command.

use super::{Context, JobArgs};
use crate::output::{format_record_json, format_step_line};
use crate::routine::SliceJob;
use anyhow::Result;
use hookbatch_core::log::tracing_sink;
use hookbatch_core::ProgressRecord;

/// Executes the step command.
///
/// # Arguments
///
/// * `ctx` - Resolved global settings
/// * `args` - Run id, identifier source, command, and limit
///
/// # Returns
///
/// The record as persisted after the invocation.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier list cannot be read
/// - The record is locked, unreadable, or cannot be saved
/// - The command fails for an identifier
pub fn execute(ctx: &Context, args: &JobArgs) -> Result<ProgressRecord> {
    let ids = args.source.load()?;
    let config = args.effective_config(&ctx.config)?;
    let job = SliceJob {
        run_id: &args.run_id,
        ids: &ids,
        work: &args.work,
        config: &config,
        sink: tracing_sink(),
    };

    let record = ctx
        .driver()?
        .invoke_once(&args.run_id, |record| job.invoke(record))?;

    if ctx.json {
        println!("{}", format_record_json(&args.run_id, &record));
    } else {
        println!("{}", format_step_line(&args.run_id, &record));
    }
    Ok(record)
}
