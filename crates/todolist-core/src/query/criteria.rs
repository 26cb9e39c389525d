//! Query criteria.

use std::collections::HashSet;

use chrono::NaiveDate;
use todolist_model::models::{Priority, Status};

/// Statuses shown when a query does not name any.
pub const DEFAULT_STATUSES: [Status; 2] = [Status::Pending, Status::InProgress];

/// Inclusive calendar-day bounds applied to a todo's completion time.
///
/// Either bound may be open. A range with neither bound imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Creates a range closed on both ends.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Creates a range open at the end.
    pub fn since(start: NaiveDate) -> Self {
        Self::new(Some(start), None)
    }

    /// Creates a range open at the start.
    pub fn until(end: NaiveDate) -> Self {
        Self::new(None, Some(end))
    }

    /// Returns true if at least one bound is set.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns true if `date` lies within the bounds, both ends inclusive.
    ///
    /// An inverted range (start after end) contains no date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// What the user wants to see.
///
/// Every field is optional. An unset field imposes no constraint, except
/// `statuses`, which falls back to [`DEFAULT_STATUSES`]. Note the difference
/// between `statuses: None` (defaults) and `statuses: Some(empty)` (nothing).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use todolist_core::query::{DateRange, QueryCriteria};
/// use todolist_model::models::Priority;
///
/// let criteria = QueryCriteria::new()
///     .with_priority(Priority::High)
///     .with_tag("work")
///     .with_date_range(DateRange::since(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()));
/// assert!(criteria.has_date_bounds());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    /// Statuses to include.
    pub statuses: Option<HashSet<Status>>,
    /// Exact priority to include.
    pub priority: Option<Priority>,
    /// Case-insensitive substring matched against each tag.
    pub tag_substring: Option<String>,
    /// Completion-day bounds.
    pub date_range: Option<DateRange>,
}

impl QueryCriteria {
    /// Creates criteria with no constraints (default visibility).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to the given statuses.
    ///
    /// Passing an empty iterator produces an explicitly empty set, which
    /// matches nothing.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Restricts the query to a single priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the query to todos with a tag containing `substring`.
    pub fn with_tag(mut self, substring: impl Into<String>) -> Self {
        self.tag_substring = Some(substring.into());
        self
    }

    /// Restricts the query to todos completed within `range`.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Returns true if a date range with at least one bound is present.
    pub fn has_date_bounds(&self) -> bool {
        self.date_range.is_some_and(|range| range.is_bounded())
    }

    /// Returns the status set a query actually admits.
    ///
    /// Unset statuses resolve to [`DEFAULT_STATUSES`]. When date bounds are
    /// present, [`Status::Completed`] is added, since only completed todos
    /// carry a completion time. No other status is ever added implicitly, and
    /// an explicitly empty set stays empty.
    pub fn effective_statuses(&self) -> HashSet<Status> {
        let mut statuses = match &self.statuses {
            Some(explicit) if explicit.is_empty() => return HashSet::new(),
            Some(explicit) => explicit.clone(),
            None => DEFAULT_STATUSES.into_iter().collect(),
        };

        if self.has_date_bounds() {
            statuses.insert(Status::Completed);
        }

        statuses
    }

    /// Returns the lowercased, trimmed tag substring, or `None` if it is unset
    /// or blank.
    pub fn tag_needle(&self) -> Option<String> {
        self.tag_substring
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}
