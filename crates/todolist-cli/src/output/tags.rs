//! Tag output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use todolist_model::models::TagRecord;

use crate::commands::tags::{TagDeleteResult, TagEditResult};

use super::helpers::{format_day, truncate_str};

/// JSON output structure for the tags list command.
#[derive(Serialize)]
pub struct TagsListOutput<'a> {
    pub tags: Vec<TagOutput<'a>>,
}

/// JSON output structure for a single tag.
#[derive(Serialize)]
pub struct TagOutput<'a> {
    pub id: u64,
    pub name: &'a str,
    pub color: &'a str,
    /// Number of todos carrying the tag name.
    pub todo_count: usize,
    pub created_at: Option<&'a str>,
}

/// Formats tags as JSON. `counts` is parallel to `tags`.
pub fn format_tags_json(tags: &[&TagRecord], counts: &[usize]) -> Result<String, serde_json::Error> {
    let output = TagsListOutput {
        tags: tags
            .iter()
            .zip(counts)
            .map(|(tag, count)| TagOutput {
                id: tag.id,
                name: &tag.name,
                color: &tag.color,
                todo_count: *count,
                created_at: tag.created_at.as_deref(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats tags as a table. `counts` is parallel to `tags`.
pub fn format_tags_table(tags: &[&TagRecord], counts: &[usize], use_colors: bool) -> String {
    if tags.is_empty() {
        return "No tags found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<6} {:<24} {:<9} {:<6} {}",
        "ID", "Name", "Color", "Todos", "Created"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (tag, count) in tags.iter().zip(counts) {
        let name = format!("#{}", tag.name);
        let line = format!(
            "{:<6} {:<24} {:<9} {:<6} {}",
            tag.id,
            truncate_str(&name, 24),
            tag.color,
            count,
            format_day(tag.created_at.as_deref()),
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// JSON output structure for a created tag.
#[derive(Serialize)]
pub struct CreatedTagOutput<'a> {
    pub id: u64,
    pub name: &'a str,
    pub color: &'a str,
    /// False when a tag with the same name already existed.
    pub created: bool,
}

/// Formats a created tag as JSON.
pub fn format_created_tag(tag: &TagRecord, created: bool) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CreatedTagOutput {
        id: tag.id,
        name: &tag.name,
        color: &tag.color,
        created,
    })
}

/// JSON output structure for an edited tag.
#[derive(Serialize)]
pub struct EditedTagOutput<'a> {
    pub id: u64,
    pub name: &'a str,
    pub color: &'a str,
    pub updated_fields: &'a [String],
}

/// Formats an edited tag as JSON.
pub fn format_edited_tag(result: &TagEditResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EditedTagOutput {
        id: result.tag.id,
        name: &result.tag.name,
        color: &result.tag.color,
        updated_fields: &result.updated_fields,
    })
}

/// JSON output structure for a deleted tag.
#[derive(Serialize)]
pub struct DeletedTagOutput<'a> {
    pub id: u64,
    pub name: &'a str,
    pub status: &'static str,
}

/// Formats a deleted tag as JSON.
pub fn format_deleted_tag(result: &TagDeleteResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DeletedTagOutput {
        id: result.id,
        name: &result.name,
        status: "deleted",
    })
}
