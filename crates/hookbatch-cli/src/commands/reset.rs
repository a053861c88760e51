// Rust guideline compliant 2026-02-06

//! Implementation of the `hookbatch reset` command.

use super::Context;
use anyhow::Result;

/// Deletes the persisted progress record so the next invocation starts over.
///
/// # Returns
///
/// `true` if a record was deleted.
///
/// # Errors
///
/// Returns an error if the record is locked by a running invocation or
/// cannot be removed.
pub fn execute(ctx: &Context, run_id: &str) -> Result<bool> {
    let store = ctx.store()?;
    let deleted = store.with_lock(run_id, || store.delete(run_id))?;

    if deleted {
        println!("Reset {run_id}");
    } else {
        println!("No progress record for {run_id}");
    }
    Ok(deleted)
}
