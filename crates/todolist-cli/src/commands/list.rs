//! List command implementation.
//!
//! Runs a query against the local collection and prints the ranked result.

use chrono::NaiveDate;
use todolist_core::query::{DateRange, QueryCriteria};
use todolist_core::Repository;
use todolist_model::models::{Priority, Status, TodoRecord};
use tracing::debug;

use super::{CommandContext, Result};
use crate::output::{format_todos_json, format_todos_table};

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Statuses to include. Empty means the default view.
    pub statuses: Vec<Status>,
    /// Exact priority.
    pub priority: Option<Priority>,
    /// Tag substring, case-insensitive.
    pub tag: Option<String>,
    /// First completion day, inclusive.
    pub from: Option<NaiveDate>,
    /// Last completion day, inclusive.
    pub to: Option<NaiveDate>,
    /// Limit results (falls back to the configured limit).
    pub limit: Option<u32>,
    /// Show all matching todos (no limit).
    pub all: bool,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext, opts: &ListOptions, repo: &Repository) -> Result<()> {
    let criteria = build_criteria(opts);
    debug!(?criteria, "running query");

    let todos = repo.query(&criteria);
    let total = todos.len();
    let todos = apply_limit(todos, effective_limit(ctx, opts));

    if ctx.json_output {
        let output = format_todos_json(&todos, total)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_todos_table(&todos, ctx.use_colors);
        print!("{output}");
        if total > todos.len() {
            println!(
                "\nShowing {} of {} todos. Use --all to see everything.",
                todos.len(),
                total
            );
        }
    }

    Ok(())
}

/// Translates command-line filters into query criteria.
pub fn build_criteria(opts: &ListOptions) -> QueryCriteria {
    let mut criteria = QueryCriteria::new();

    if !opts.statuses.is_empty() {
        criteria = criteria.with_statuses(opts.statuses.iter().copied());
    }
    if let Some(priority) = opts.priority {
        criteria = criteria.with_priority(priority);
    }
    if let Some(tag) = &opts.tag {
        criteria = criteria.with_tag(tag.clone());
    }
    if opts.from.is_some() || opts.to.is_some() {
        criteria = criteria.with_date_range(DateRange::new(opts.from, opts.to));
    }

    criteria
}

/// Returns the row limit, or `None` when everything should be shown.
fn effective_limit(ctx: &CommandContext, opts: &ListOptions) -> Option<usize> {
    if opts.all {
        None
    } else {
        Some(opts.limit.unwrap_or(ctx.list_limit) as usize)
    }
}

fn apply_limit(mut todos: Vec<&TodoRecord>, limit: Option<usize>) -> Vec<&TodoRecord> {
    if let Some(limit) = limit {
        todos.truncate(limit);
    }
    todos
}
