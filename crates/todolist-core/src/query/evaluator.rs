//! Criteria evaluation against todo records.
//!
//! # Example
//!
//! ```
//! use todolist_core::query::{QueryCriteria, QueryEvaluator};
//! use todolist_model::models::{Status, TodoRecord};
//!
//! let mut done = TodoRecord::new(1, "Ship it");
//! done.status = Status::Completed;
//! let open = TodoRecord::new(2, "Plan next");
//!
//! let criteria = QueryCriteria::new();
//! let evaluator = QueryEvaluator::new(&criteria);
//!
//! assert!(!evaluator.matches(&done));
//! assert!(evaluator.matches(&open));
//! ```

use std::collections::HashSet;

use todolist_model::models::{Status, TodoRecord};
use tracing::warn;

use super::criteria::QueryCriteria;

/// Evaluates [`QueryCriteria`] against todo records.
///
/// The effective status set and the normalized tag needle are resolved once in
/// [`new`](Self::new); every check after that is a pure predicate on a single
/// record. All checks must pass for a record to match.
#[derive(Debug)]
pub struct QueryEvaluator<'a> {
    criteria: &'a QueryCriteria,
    statuses: HashSet<Status>,
    tag_needle: Option<String>,
}

impl<'a> QueryEvaluator<'a> {
    /// Creates a new evaluator for `criteria`.
    pub fn new(criteria: &'a QueryCriteria) -> Self {
        Self {
            criteria,
            statuses: criteria.effective_statuses(),
            tag_needle: criteria.tag_needle(),
        }
    }

    /// Returns the status set this evaluator admits.
    pub fn effective_statuses(&self) -> &HashSet<Status> {
        &self.statuses
    }

    /// Returns true if the record satisfies every active criterion.
    pub fn matches(&self, todo: &TodoRecord) -> bool {
        self.status_matches(todo)
            && self.priority_matches(todo)
            && self.tag_matches(todo)
            && self.date_matches(todo)
    }

    /// Filters a slice of todos, returning only those that match, in input order.
    pub fn filter_items<'b>(&self, todos: &'b [TodoRecord]) -> Vec<&'b TodoRecord> {
        if self.statuses.is_empty() {
            return Vec::new();
        }
        todos.iter().filter(|todo| self.matches(todo)).collect()
    }

    fn status_matches(&self, todo: &TodoRecord) -> bool {
        self.statuses.contains(&todo.status)
    }

    fn priority_matches(&self, todo: &TodoRecord) -> bool {
        self.criteria
            .priority
            .map_or(true, |priority| todo.priority == priority)
    }

    /// Case-insensitive substring match against any tag.
    fn tag_matches(&self, todo: &TodoRecord) -> bool {
        let Some(needle) = &self.tag_needle else {
            return true;
        };

        todo.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle.as_str()))
    }

    /// Inclusive calendar-day check on the completion time.
    ///
    /// A record without a usable completion time never matches a bounded range.
    fn date_matches(&self, todo: &TodoRecord) -> bool {
        let Some(range) = self.criteria.date_range.filter(|r| r.is_bounded()) else {
            return true;
        };

        let Some(raw) = todo.completed_at.as_deref() else {
            return false;
        };

        match todo.completion_date() {
            Some(date) => range.contains(date),
            None => {
                warn!(id = todo.id, completed_at = raw, "ignoring unparseable completion time");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::criteria::DateRange;
    use chrono::NaiveDate;
    use todolist_model::models::Priority;

    fn todo(id: u64, status: Status) -> TodoRecord {
        let mut todo = TodoRecord::new(id, format!("todo {id}"));
        todo.status = status;
        todo
    }

    fn completed_on(id: u64, at: &str) -> TodoRecord {
        let mut todo = todo(id, Status::Completed);
        todo.completed_at = Some(at.to_string());
        todo
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Status ====================

    #[test]
    fn test_default_statuses_hide_completed_and_cancelled() {
        let criteria = QueryCriteria::new();
        let evaluator = QueryEvaluator::new(&criteria);

        assert!(evaluator.matches(&todo(1, Status::Pending)));
        assert!(evaluator.matches(&todo(2, Status::InProgress)));
        assert!(!evaluator.matches(&completed_on(3, "2025-09-01 10:00:00")));
        assert!(!evaluator.matches(&todo(4, Status::Cancelled)));
    }

    #[test]
    fn test_explicit_statuses_replace_defaults() {
        let criteria = QueryCriteria::new().with_statuses([Status::Cancelled]);
        let evaluator = QueryEvaluator::new(&criteria);

        assert!(!evaluator.matches(&todo(1, Status::Pending)));
        assert!(evaluator.matches(&todo(2, Status::Cancelled)));
    }

    #[test]
    fn test_empty_statuses_match_nothing() {
        let criteria = QueryCriteria::new().with_statuses([]);
        let evaluator = QueryEvaluator::new(&criteria);
        let todos = vec![todo(1, Status::Pending), todo(2, Status::Cancelled)];

        assert!(evaluator.filter_items(&todos).is_empty());
    }

    // ==================== Priority ====================

    #[test]
    fn test_priority_exact_match() {
        let criteria = QueryCriteria::new().with_priority(Priority::Medium);
        let evaluator = QueryEvaluator::new(&criteria);

        let mut medium = todo(1, Status::Pending);
        medium.priority = Priority::Medium;
        let mut high = todo(2, Status::Pending);
        high.priority = Priority::High;

        assert!(evaluator.matches(&medium));
        assert!(!evaluator.matches(&high));
    }

    // ==================== Tags ====================

    #[test]
    fn test_tag_substring_case_insensitive() {
        let criteria = QueryCriteria::new().with_tag("wor");
        let evaluator = QueryEvaluator::new(&criteria);

        let mut tagged = todo(1, Status::Pending);
        tagged.tags = vec!["home".to_string(), "Work".to_string()];
        let untagged = todo(2, Status::Pending);

        assert!(evaluator.matches(&tagged));
        assert!(!evaluator.matches(&untagged));
    }

    #[test]
    fn test_uppercase_needle_matches_lowercase_tag() {
        let criteria = QueryCriteria::new().with_tag("CLOUD");
        let evaluator = QueryEvaluator::new(&criteria);

        let mut tagged = todo(1, Status::Pending);
        tagged.tags = vec!["oracle-cloud".to_string()];
        assert!(evaluator.matches(&tagged));
    }

    #[test]
    fn test_blank_tag_is_no_constraint() {
        let criteria = QueryCriteria::new().with_tag("  ");
        let evaluator = QueryEvaluator::new(&criteria);
        assert!(evaluator.matches(&todo(1, Status::Pending)));
    }

    // ==================== Dates ====================

    #[test]
    fn test_date_bound_excludes_records_without_completion() {
        let criteria = QueryCriteria::new().with_date_range(DateRange::since(day(2025, 1, 1)));
        let evaluator = QueryEvaluator::new(&criteria);

        assert!(!evaluator.matches(&todo(1, Status::Pending)));
        assert!(evaluator.matches(&completed_on(2, "2025-03-01 12:00:00")));
    }

    #[test]
    fn test_unparseable_completion_is_excluded_not_fatal() {
        let criteria = QueryCriteria::new().with_date_range(DateRange::since(day(2025, 1, 1)));
        let evaluator = QueryEvaluator::new(&criteria);

        let todos = vec![
            completed_on(1, "last tuesday"),
            completed_on(2, "2025-03-01 12:00:00"),
        ];
        let ids: Vec<u64> = evaluator.filter_items(&todos).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_unparseable_completion_ignored_without_date_bounds() {
        let criteria = QueryCriteria::new().with_statuses([Status::Completed]);
        let evaluator = QueryEvaluator::new(&criteria);
        assert!(evaluator.matches(&completed_on(1, "last tuesday")));
    }

    #[test]
    fn test_filter_items_preserves_input_order() {
        let criteria = QueryCriteria::new();
        let evaluator = QueryEvaluator::new(&criteria);
        let todos = vec![
            todo(3, Status::Pending),
            todo(1, Status::Cancelled),
            todo(2, Status::InProgress),
        ];

        let ids: Vec<u64> = evaluator.filter_items(&todos).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
