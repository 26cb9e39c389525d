//! Stats command implementation.

use todolist_core::Repository;

use super::{CommandContext, Result};
use crate::output::{format_summary_json, format_summary_table};

/// Executes the stats command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext, repo: &Repository) -> Result<()> {
    let summary = repo.summary();

    if ctx.json_output {
        println!("{}", format_summary_json(&summary)?);
    } else if !ctx.quiet {
        print!("{}", format_summary_table(&summary, ctx.use_colors));
    }

    Ok(())
}
