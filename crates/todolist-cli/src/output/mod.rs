//! Output formatting utilities for the tl CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`todos`] - Todo output formatting (list, show, add, edit)
//! - [`tags`] - Tag output formatting (list, add, edit, delete)
//! - [`stats`] - Summary output formatting
//! - [`helpers`] - Common formatting utilities (truncation, priority, status, dates)

pub mod helpers;
mod stats;
mod tags;
mod todos;

// Todos
pub use todos::{
    format_todo_details_table, format_todo_json, format_todos_json, format_todos_table,
};

// Tags
pub use tags::{
    format_created_tag, format_deleted_tag, format_edited_tag, format_tags_json,
    format_tags_table,
};

// Stats
pub use stats::{format_summary_json, format_summary_table};
