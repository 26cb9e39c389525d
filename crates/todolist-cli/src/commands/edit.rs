//! Edit command implementation.
//!
//! Builds a partial update from the flags and applies it through the
//! repository, which handles the completion-time rules.

use chrono::NaiveDateTime;
use todolist_core::repository::TodoPatch;
use todolist_core::Repository;
use todolist_model::models::{Priority, Status, TodoRecord};

use super::{CommandContext, Result};

/// Options for the edit command.
#[derive(Debug, Default)]
pub struct EditOptions {
    /// Todo ID.
    pub id: u64,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Remove the description.
    pub no_description: bool,
    /// New priority.
    pub priority: Option<Priority>,
    /// New status.
    pub status: Option<Status>,
    /// Completion time.
    pub completed_at: Option<NaiveDateTime>,
    /// Set tags (replaces existing).
    pub tags: Vec<String>,
    /// Tags to add.
    pub add_tags: Vec<String>,
    /// Tags to remove.
    pub remove_tags: Vec<String>,
    /// Remove all tags.
    pub clear_tags: bool,
    /// Set image paths (replaces existing).
    pub images: Vec<String>,
    /// Remove all image paths.
    pub clear_images: bool,
}

/// Result of a successful edit operation.
#[derive(Debug)]
pub struct EditResult {
    /// The updated todo.
    pub todo: TodoRecord,
    /// Fields that were updated.
    pub updated_fields: Vec<String>,
}

/// Executes the edit command.
///
/// # Errors
///
/// Returns an error if the todo does not exist, the new title is blank, or
/// the data file cannot be saved.
pub fn execute(ctx: &CommandContext, opts: &EditOptions, repo: &mut Repository) -> Result<()> {
    let current = repo.todo(opts.id)?;
    let (patch, updated_fields) = build_patch(opts, current);

    if patch.is_empty() {
        if !ctx.quiet {
            if ctx.json_output {
                let output = serde_json::json!({
                    "status": "no_changes",
                    "id": opts.id,
                    "message": "No changes specified"
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("No changes specified for todo {}", opts.id);
            }
        }
        return Ok(());
    }

    let todo = repo.update_todo(opts.id, patch)?;
    let result = EditResult {
        todo,
        updated_fields,
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "updated",
            "id": result.todo.id,
            "title": result.todo.title,
            "updated_fields": result.updated_fields
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Updated: {} ({})", result.todo.title, result.todo.id);
        if ctx.verbose {
            println!("  Changed: {}", result.updated_fields.join(", "));
        }
    }

    Ok(())
}

/// Builds the patch for `current` and lists the fields it touches.
///
/// Tag additions and removals are applied to the current tag list; a
/// removal that matches nothing is not reported.
pub fn build_patch(opts: &EditOptions, current: &TodoRecord) -> (TodoPatch, Vec<String>) {
    let mut patch = TodoPatch::default();
    let mut updated_fields = Vec::new();

    if let Some(title) = &opts.title {
        patch.title = Some(title.clone());
        updated_fields.push("title".to_string());
    }

    if opts.no_description {
        patch.description = Some(None);
        updated_fields.push("description (removed)".to_string());
    } else if let Some(description) = &opts.description {
        patch.description = Some(Some(description.clone()));
        updated_fields.push("description".to_string());
    }

    if let Some(priority) = opts.priority {
        patch.priority = Some(priority);
        updated_fields.push("priority".to_string());
    }

    if let Some(status) = opts.status {
        patch.status = Some(status);
        updated_fields.push("status".to_string());
    }

    if let Some(at) = opts.completed_at {
        patch.completed_at = Some(at);
        updated_fields.push("completed_at".to_string());
    }

    if opts.clear_tags {
        patch.tags = Some(Vec::new());
        updated_fields.push("tags (cleared)".to_string());
    } else if !opts.tags.is_empty() {
        patch.tags = Some(opts.tags.clone());
        updated_fields.push("tags".to_string());
    }

    if !opts.add_tags.is_empty() || !opts.remove_tags.is_empty() {
        let mut tags = patch.tags.take().unwrap_or_else(|| current.tags.clone());
        let mut changed = false;

        for tag in &opts.add_tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
                updated_fields.push(format!("tag +{tag}"));
                changed = true;
            }
        }

        for tag in &opts.remove_tags {
            let tag = tag.trim();
            if let Some(pos) = tags.iter().position(|t| t == tag) {
                tags.remove(pos);
                updated_fields.push(format!("tag -{tag}"));
                changed = true;
            }
        }

        if changed || opts.clear_tags || !opts.tags.is_empty() {
            patch.tags = Some(tags);
        }
    }

    if opts.clear_images {
        patch.image_paths = Some(Vec::new());
        updated_fields.push("images (cleared)".to_string());
    } else if !opts.images.is_empty() {
        patch.image_paths = Some(opts.images.clone());
        updated_fields.push("images".to_string());
    }

    (patch, updated_fields)
}
