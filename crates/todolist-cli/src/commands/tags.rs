//! Tag command implementations.
//!
//! Tags are loose references: todos carry tag names, and renaming or deleting
//! a tag record leaves those names alone.

use todolist_core::repository::TagPatch;
use todolist_core::Repository;
use todolist_model::models::{TagRecord, TodoRecord};

use super::{confirm_operation, CommandContext, CommandError, ConfirmResult, Result};
use crate::output::{
    format_created_tag, format_deleted_tag, format_edited_tag, format_tags_json,
    format_tags_table,
};

// ============================================================================
// Tags List Command
// ============================================================================

/// Executes the tags list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext, repo: &Repository) -> Result<()> {
    let tags = repo.tags();
    let counts = usage_counts(&tags, repo.todos());

    if ctx.json_output {
        let output = format_tags_json(&tags, &counts)?;
        println!("{output}");
    } else if !ctx.quiet {
        print!("{}", format_tags_table(&tags, &counts, ctx.use_colors));
    }

    Ok(())
}

/// Counts the todos carrying each tag name.
fn usage_counts(tags: &[&TagRecord], todos: &[TodoRecord]) -> Vec<usize> {
    tags.iter()
        .map(|tag| todos.iter().filter(|t| t.has_tag(&tag.name)).count())
        .collect()
}

// ============================================================================
// Tags Add Command
// ============================================================================

/// Options for the tags add command.
#[derive(Debug)]
pub struct TagsAddOptions {
    /// Tag name.
    pub name: String,
    /// Display color.
    pub color: Option<String>,
}

/// Executes the tags add command. Adding an existing name is not an error.
///
/// # Errors
///
/// Returns an error if the name is blank, the color is malformed, or the data
/// file cannot be saved.
pub fn execute_add(ctx: &CommandContext, opts: &TagsAddOptions, repo: &mut Repository) -> Result<()> {
    let color = opts.color.as_deref().map(parse_color).transpose()?;
    let existed = repo.collection().tag_by_name(opts.name.trim()).is_some();
    let tag = repo.create_tag(&opts.name, color)?;

    if ctx.json_output {
        let output = format_created_tag(&tag, !existed)?;
        println!("{output}");
    } else if !ctx.quiet {
        if existed {
            println!("Tag already exists: #{} ({})", tag.name, tag.id);
        } else {
            println!("Created tag: #{} ({})", tag.name, tag.id);
        }
    }

    Ok(())
}

// ============================================================================
// Tags Edit Command
// ============================================================================

/// Options for the tags edit command.
#[derive(Debug)]
pub struct TagsEditOptions {
    /// Tag name or ID.
    pub tag: String,
    /// New name.
    pub name: Option<String>,
    /// New color.
    pub color: Option<String>,
}

/// Result of a successful tag edit operation.
#[derive(Debug)]
pub struct TagEditResult {
    /// The updated tag.
    pub tag: TagRecord,
    /// Fields that were updated.
    pub updated_fields: Vec<String>,
}

/// Executes the tags edit command.
///
/// # Errors
///
/// Returns an error if the tag is unknown, nothing would change, the new name
/// is taken, or the data file cannot be saved.
pub fn execute_edit(ctx: &CommandContext, opts: &TagsEditOptions, repo: &mut Repository) -> Result<()> {
    if opts.name.is_none() && opts.color.is_none() {
        return Err(CommandError::Config(
            "no changes specified; use --name or --color".to_string(),
        ));
    }

    let id = repo.resolve_tag(&opts.tag)?.id;
    let color = opts.color.as_deref().map(parse_color).transpose()?;

    let mut updated_fields = Vec::new();
    if opts.name.is_some() {
        updated_fields.push("name".to_string());
    }
    if color.is_some() {
        updated_fields.push("color".to_string());
    }

    let tag = repo.update_tag(
        id,
        TagPatch {
            name: opts.name.clone(),
            color,
        },
    )?;
    let result = TagEditResult {
        tag,
        updated_fields,
    };

    if ctx.json_output {
        let output = format_edited_tag(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Updated tag: #{} ({})", result.tag.name, result.tag.id);
        if ctx.verbose {
            println!("  Changed: {}", result.updated_fields.join(", "));
        }
    }

    Ok(())
}

// ============================================================================
// Tags Delete Command
// ============================================================================

/// Options for the tags delete command.
#[derive(Debug)]
pub struct TagsDeleteOptions {
    /// Tag name or ID.
    pub tag: String,
    /// Skip confirmation prompt.
    pub force: bool,
}

/// Result of a successful tag delete operation.
#[derive(Debug)]
pub struct TagDeleteResult {
    /// The deleted tag's ID.
    pub id: u64,
    /// The deleted tag's name.
    pub name: String,
}

/// Executes the tags delete command.
///
/// # Errors
///
/// Returns an error if the tag is unknown, confirmation is impossible, or the
/// data file cannot be saved.
pub fn execute_delete(
    ctx: &CommandContext,
    opts: &TagsDeleteOptions,
    repo: &mut Repository,
) -> Result<()> {
    let tag = repo.resolve_tag(&opts.tag)?;
    let id = tag.id;
    let items = vec![(tag.id.to_string(), format!("#{}", tag.name))];

    match confirm_operation("delete tag", &items, opts.force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let deleted = repo.delete_tag(id)?;
    let result = TagDeleteResult {
        id: deleted.id,
        name: deleted.name,
    };

    if ctx.json_output {
        let output = format_deleted_tag(&result)?;
        println!("{output}");
    } else if !ctx.quiet {
        println!("Deleted tag: #{} ({})", result.name, result.id);
    }

    Ok(())
}

/// Validates a `#rgb` or `#rrggbb` color and lowercases it.
fn parse_color(color: &str) -> Result<String> {
    let color = color.trim();
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        });

    if valid {
        Ok(color.to_ascii_lowercase())
    } else {
        Err(CommandError::Config(format!(
            "invalid color '{color}', expected a hex color like #1890ff"
        )))
    }
}
