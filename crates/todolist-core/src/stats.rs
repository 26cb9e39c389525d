//! Summary counts over a todo collection.

use serde::Serialize;
use todolist_model::models::{Priority, Status, TodoRecord};

/// Todo counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    /// Returns the count for `status`.
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
            Status::Cancelled => self.cancelled,
        }
    }
}

/// Todo counts by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    /// Returns the count for `priority`.
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Dashboard numbers for a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    /// Completed share of all todos as a whole percent, rounded half up.
    /// Zero for an empty collection.
    pub completion_rate: u32,
}

impl Summary {
    /// Counts `todos`.
    pub fn from_todos(todos: &[TodoRecord]) -> Self {
        let mut summary = Self {
            total: todos.len(),
            ..Self::default()
        };

        for todo in todos {
            match todo.status {
                Status::Pending => summary.by_status.pending += 1,
                Status::InProgress => summary.by_status.in_progress += 1,
                Status::Completed => summary.by_status.completed += 1,
                Status::Cancelled => summary.by_status.cancelled += 1,
            }
            match todo.priority {
                Priority::High => summary.by_priority.high += 1,
                Priority::Medium => summary.by_priority.medium += 1,
                Priority::Low => summary.by_priority.low += 1,
            }
        }

        summary.completion_rate = percent(summary.by_status.completed, summary.total);
        summary
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer form of round(part / total * 100) with halves rounded up
    ((part * 200 + total) / (2 * total)) as u32
}
