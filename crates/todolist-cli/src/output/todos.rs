//! Todo output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use todolist_model::models::TodoRecord;

use super::helpers::{
    format_datetime, format_day, format_priority, format_status, format_tags, truncate_str,
};

/// JSON output structure for list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub todos: Vec<TodoOutput<'a>>,
    /// Number of todos that matched before the limit was applied.
    pub total: usize,
    pub has_more: bool,
}

/// JSON output structure for a single todo.
#[derive(Serialize)]
pub struct TodoOutput<'a> {
    pub id: u64,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub priority: &'static str,
    pub status: &'static str,
    pub tags: &'a [String],
    pub image_paths: &'a [String],
    pub completed_at: Option<&'a str>,
    pub created_at: Option<&'a str>,
    pub updated_at: Option<&'a str>,
}

impl<'a> From<&'a TodoRecord> for TodoOutput<'a> {
    fn from(todo: &'a TodoRecord) -> Self {
        Self {
            id: todo.id,
            title: &todo.title,
            description: todo.description.as_deref(),
            priority: todo.priority.as_str(),
            status: todo.status.as_str(),
            tags: &todo.tags,
            image_paths: &todo.image_paths,
            completed_at: todo.completed_at.as_deref(),
            created_at: todo.created_at.as_deref(),
            updated_at: todo.updated_at.as_deref(),
        }
    }
}

/// Formats a page of query results as JSON.
pub fn format_todos_json(todos: &[&TodoRecord], total: usize) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        todos: todos.iter().map(|t| TodoOutput::from(*t)).collect(),
        total,
        has_more: total > todos.len(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a single todo as JSON.
pub fn format_todo_json(todo: &TodoRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TodoOutput::from(todo))
}

/// Formats todos as a table.
pub fn format_todos_table(todos: &[&TodoRecord], use_colors: bool) -> String {
    if todos.is_empty() {
        return "No todos found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<6} {:<6} {:<11} {:<10} {:<20} {}",
        "ID", "Pri", "Status", "Done", "Tags", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for todo in todos {
        let line = format!(
            "{:<6} {} {} {:<10} {:<20} {}",
            todo.id,
            format_priority(todo.priority, 6, use_colors),
            format_status(todo.status, 11, use_colors),
            format_day(todo.completed_at.as_deref()),
            format_tags(&todo.tags, 20),
            truncate_str(&todo.title, 60),
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Formats todo details as a human-readable block (show command).
pub fn format_todo_details_table(todo: &TodoRecord, use_colors: bool) -> String {
    let mut output = String::new();

    let title_label = if use_colors {
        "Todo:".bold().to_string()
    } else {
        "Todo:".to_string()
    };
    output.push_str(&format!("{} {}\n", title_label, todo.title));
    output.push_str(&format!("ID: {}\n", todo.id));
    output.push_str(&format!(
        "Priority: {}\n",
        format_priority(todo.priority, 0, use_colors)
    ));
    output.push_str(&format!(
        "Status: {}\n",
        format_status(todo.status, 0, use_colors)
    ));

    if !todo.tags.is_empty() {
        let tags: Vec<String> = todo.tags.iter().map(|t| format!("#{t}")).collect();
        output.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    if let Some(ref completed) = todo.completed_at {
        output.push_str(&format!("Completed: {}\n", format_datetime(completed)));
    }
    if let Some(ref created) = todo.created_at {
        output.push_str(&format!("Created: {}\n", format_datetime(created)));
    }
    if let Some(ref updated) = todo.updated_at {
        output.push_str(&format!("Updated: {}\n", format_datetime(updated)));
    }

    if let Some(ref description) = todo.description {
        output.push_str("Description:\n");
        for line in description.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    if !todo.image_paths.is_empty() {
        output.push_str(&format!("\nImages ({}):\n", todo.image_paths.len()));
        for path in &todo.image_paths {
            output.push_str(&format!("  - {}\n", path));
        }
    }

    output
}
