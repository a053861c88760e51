// Rust guideline compliant 2026-02-06

//! Implementation of the `hookbatch status` command.

use super::Context;
use crate::output::{format_record_json, format_record_table};
use anyhow::Result;

/// Prints the persisted progress record for `run_id`.
///
/// # Errors
///
/// Returns an error if the run id is invalid or the record cannot be read.
pub fn execute(ctx: &Context, run_id: &str) -> Result<()> {
    let record = ctx.store()?.load(run_id)?;

    if ctx.json {
        println!("{}", format_record_json(run_id, &record));
    } else {
        println!("{}", format_record_table(run_id, &record));
    }
    Ok(())
}
