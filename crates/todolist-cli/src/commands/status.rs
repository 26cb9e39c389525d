//! Status and done command implementations.
//!
//! Both go through [`Repository::set_status`], so completion times are
//! stamped and cleared the same way as in `edit`.

use chrono::NaiveDateTime;
use serde::Serialize;
use todolist_core::Repository;
use todolist_model::models::Status;

use super::{CommandContext, CommandError, Result};

/// Options for the status command.
#[derive(Debug)]
pub struct StatusOptions {
    /// Todo ID.
    pub id: u64,
    /// Target status.
    pub status: Status,
    /// Completion time when moving to completed.
    pub at: Option<NaiveDateTime>,
}

/// Options for the done command.
#[derive(Debug)]
pub struct DoneOptions {
    /// Todo IDs.
    pub ids: Vec<u64>,
    /// Completion time (default: now).
    pub at: Option<NaiveDateTime>,
}

/// Result of changing the status of a single todo.
#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub id: u64,
    pub title: String,
    pub status: &'static str,
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResult {
    fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Executes the status command.
///
/// # Errors
///
/// Returns an error if the todo does not exist or the data file cannot be saved.
pub fn execute_status(
    ctx: &CommandContext,
    opts: &StatusOptions,
    repo: &mut Repository,
) -> Result<()> {
    let todo = repo.set_status(opts.id, opts.status, opts.at)?;

    if ctx.json_output {
        let result = StatusResult {
            id: todo.id,
            title: todo.title,
            status: todo.status.as_str(),
            completed_at: todo.completed_at,
            error: None,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !ctx.quiet {
        println!("{}: {} ({})", todo.status, todo.title, todo.id);
    }

    Ok(())
}

/// Executes the done command.
///
/// Each id is completed independently; unknown ids are reported and the rest
/// still complete.
///
/// # Errors
///
/// Returns an error if every id failed.
pub fn execute_done(ctx: &CommandContext, opts: &DoneOptions, repo: &mut Repository) -> Result<()> {
    let results = complete_all(repo, &opts.ids, opts.at);
    let failed = results.iter().filter(|r| !r.succeeded()).count();

    if ctx.json_output {
        let output = serde_json::json!({
            "completed": results.iter().filter(|r| r.succeeded()).collect::<Vec<_>>(),
            "failed": results.iter().filter(|r| !r.succeeded()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        for result in &results {
            match &result.error {
                None => println!("Completed: {} ({})", result.title, result.id),
                Some(err) => eprintln!("Failed to complete {}: {}", result.id, err),
            }
        }
    }

    if failed > 0 && failed == results.len() {
        return Err(CommandError::Config(format!(
            "failed to complete {failed} todo(s)"
        )));
    }

    Ok(())
}

fn complete_all(
    repo: &mut Repository,
    ids: &[u64],
    at: Option<NaiveDateTime>,
) -> Vec<StatusResult> {
    ids.iter()
        .map(|&id| match repo.set_status(id, Status::Completed, at) {
            Ok(todo) => StatusResult {
                id,
                title: todo.title,
                status: todo.status.as_str(),
                completed_at: todo.completed_at,
                error: None,
            },
            Err(e) => StatusResult {
                id,
                title: String::new(),
                status: "",
                completed_at: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}
