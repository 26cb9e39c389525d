//! Summary output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use todolist_core::stats::Summary;
use todolist_model::models::{Priority, Status};

use super::helpers::{format_priority, format_status};

/// JSON output structure for the stats command.
#[derive(Serialize)]
pub struct SummaryOutput {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Whole percent of todos that are completed.
    pub completion_rate: u32,
}

impl From<&Summary> for SummaryOutput {
    fn from(summary: &Summary) -> Self {
        Self {
            total: summary.total,
            pending: summary.by_status.pending,
            in_progress: summary.by_status.in_progress,
            completed: summary.by_status.completed,
            cancelled: summary.by_status.cancelled,
            high: summary.by_priority.high,
            medium: summary.by_priority.medium,
            low: summary.by_priority.low,
            completion_rate: summary.completion_rate,
        }
    }
}

/// Formats the summary as JSON.
pub fn format_summary_json(summary: &Summary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SummaryOutput::from(summary))
}

/// Formats the summary as a small report.
pub fn format_summary_table(summary: &Summary, use_colors: bool) -> String {
    let mut output = String::new();

    let heading = |text: &str| {
        if use_colors {
            format!("{}\n", text.bold())
        } else {
            format!("{text}\n")
        }
    };

    output.push_str(&format!("Total: {}\n", summary.total));
    output.push_str(&format!("Completion rate: {}%\n", summary.completion_rate));

    output.push('\n');
    output.push_str(&heading("By status:"));
    for status in Status::ALL {
        output.push_str(&format!(
            "  {} {}\n",
            format_status(status, 12, use_colors),
            summary.by_status.get(status)
        ));
    }

    output.push('\n');
    output.push_str(&heading("By priority:"));
    for priority in Priority::ALL {
        output.push_str(&format!(
            "  {} {}\n",
            format_priority(priority, 12, use_colors),
            summary.by_priority.get(priority)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolist_model::models::TodoRecord;

    fn summary() -> Summary {
        let mut done = TodoRecord::new(1, "a");
        done.status = Status::Completed;
        done.priority = Priority::High;
        let open = TodoRecord::new(2, "b");
        let mut doing = TodoRecord::new(3, "c");
        doing.status = Status::InProgress;
        doing.priority = Priority::Medium;
        Summary::from_todos(&[done, open, doing])
    }

    #[test]
    fn test_summary_table() {
        let table = format_summary_table(&summary(), false);

        assert!(table.starts_with("Total: 3\nCompletion rate: 33%\n"));
        assert!(table.contains("  pending      1\n"));
        assert!(table.contains("  in-progress  1\n"));
        assert!(table.contains("  cancelled    0\n"));
        assert!(table.contains("  high         1\n"));
        assert!(table.find("high").unwrap() < table.find("low ").unwrap());
    }

    #[test]
    fn test_summary_json() {
        let value: serde_json::Value =
            serde_json::from_str(&format_summary_json(&summary()).unwrap()).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["completed"], 1);
        assert_eq!(value["in_progress"], 1);
        assert_eq!(value["low"], 1);
        assert_eq!(value["completion_rate"], 33);
    }
}
