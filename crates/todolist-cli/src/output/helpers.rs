//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use todolist_model::models::{Priority, Status};
use todolist_model::timestamp::parse_timestamp;

/// Truncates a string to at most `max_len` characters, ending in "..." when cut.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats priority for a table cell padded to `width`.
pub fn format_priority(priority: Priority, width: usize, use_colors: bool) -> String {
    let label = format!("{:<width$}", priority.as_str());

    if use_colors {
        match priority {
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.dimmed().to_string(),
        }
    } else {
        label
    }
}

/// Formats status for a table cell padded to `width`.
pub fn format_status(status: Status, width: usize, use_colors: bool) -> String {
    let label = format!("{:<width$}", status.as_str());

    if use_colors {
        match status {
            Status::Pending => label,
            Status::InProgress => label.blue().to_string(),
            Status::Completed => label.green().to_string(),
            Status::Cancelled => label.dimmed().to_string(),
        }
    } else {
        label
    }
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    truncate_str(&formatted.join(" "), max_len)
}

/// Formats a stored timestamp as `YYYY-MM-DD HH:MM`. Unparseable text is shown as is.
pub fn format_datetime(stamp: &str) -> String {
    parse_timestamp(stamp)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| stamp.to_string())
}

/// Formats the day part of a stored timestamp, or an empty string.
pub fn format_day(stamp: Option<&str>) -> String {
    stamp
        .and_then(parse_timestamp)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
