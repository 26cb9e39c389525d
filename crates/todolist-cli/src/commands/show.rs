//! Show command implementation.

use todolist_core::Repository;

use super::{CommandContext, Result};
use crate::output::{format_todo_details_table, format_todo_json};

/// Options for the show command.
#[derive(Debug)]
pub struct ShowOptions {
    /// Todo ID.
    pub id: u64,
}

/// Executes the show command.
///
/// # Errors
///
/// Returns an error if the todo does not exist.
pub fn execute(ctx: &CommandContext, opts: &ShowOptions, repo: &Repository) -> Result<()> {
    let todo = repo.todo(opts.id)?;

    if ctx.json_output {
        let output = format_todo_json(todo)?;
        println!("{output}");
    } else if !ctx.quiet {
        print!("{}", format_todo_details_table(todo, ctx.use_colors));
    }

    Ok(())
}
