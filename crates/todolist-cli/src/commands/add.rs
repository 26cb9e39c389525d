//! Add command implementation.
//!
//! Creates a todo in the local collection.

use chrono::NaiveDateTime;
use todolist_core::repository::NewTodo;
use todolist_core::Repository;
use todolist_model::models::{Priority, Status};

use super::{CommandContext, Result};
use crate::output::format_todo_json;

/// Options for the add command.
#[derive(Debug, Default)]
pub struct AddOptions {
    /// Todo title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Priority (default: low).
    pub priority: Option<Priority>,
    /// Initial status (default: pending).
    pub status: Option<Status>,
    /// Tag names, created if missing.
    pub tags: Vec<String>,
    /// Attached image paths.
    pub images: Vec<String>,
    /// Completion time for a completed todo.
    pub completed_at: Option<NaiveDateTime>,
}

impl AddOptions {
    /// Converts the options into repository input.
    pub fn to_new_todo(&self) -> NewTodo {
        let mut new = NewTodo::new(self.title.clone())
            .with_tags(self.tags.iter().cloned())
            .with_image_paths(self.images.iter().cloned());

        if let Some(description) = &self.description {
            new = new.with_description(description.clone());
        }
        if let Some(priority) = self.priority {
            new = new.with_priority(priority);
        }
        if let Some(status) = self.status {
            new = new.with_status(status);
        }
        if let Some(at) = self.completed_at {
            new = new.with_completed_at(at);
        }

        new
    }
}

/// Executes the add command.
///
/// # Errors
///
/// Returns an error if the title is blank or the data file cannot be saved.
pub fn execute(ctx: &CommandContext, opts: &AddOptions, repo: &mut Repository) -> Result<()> {
    let todo = repo.create_todo(opts.to_new_todo())?;

    if ctx.json_output {
        let output = format_todo_json(&todo)?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Created todo: {} ({})", todo.title, todo.id);
        if ctx.verbose {
            println!("  Priority: {}", todo.priority);
            println!("  Status: {}", todo.status);
            if !todo.tags.is_empty() {
                println!("  Tags: {}", todo.tags.join(", "));
            }
        }
    }

    Ok(())
}
