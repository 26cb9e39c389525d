//! Todo query engine: filter, then rank.
//!
//! A query is a pure function of a todo collection and a [`QueryCriteria`]:
//! the [`QueryEvaluator`] keeps the records that satisfy every active
//! criterion, then [`rank`] orders them for display. Nothing is cached between
//! calls and the input is never modified, so a query can be re-run on every
//! criteria change.
//!
//! # Rules
//!
//! ## Status
//! - No statuses given: pending and in-progress todos only
//! - Any date bound given: completed todos are added to the status set
//! - Explicitly empty status set: nothing matches
//!
//! ## Priority
//! - Exact match on a single priority
//!
//! ## Tag
//! - Case-insensitive substring against any of a todo's tags
//!
//! ## Completion date
//! - Inclusive calendar-day bounds on `completed_at`
//! - Todos without a (parseable) completion time never match a bounded range
//!
//! ## Order
//! - Priority descending, then first tag ascending, untagged last
//! - Stable for ties
//!
//! # Example
//!
//! ```
//! use todolist_core::query::{query, QueryCriteria};
//! use todolist_model::models::{Priority, TodoRecord};
//!
//! let mut low = TodoRecord::new(1, "Water plants");
//! low.tags = vec!["home".to_string()];
//! let mut high = TodoRecord::new(2, "File taxes");
//! high.priority = Priority::High;
//!
//! let todos = vec![low, high];
//! let view = query(&todos, &QueryCriteria::new());
//! let ids: Vec<u64> = view.iter().map(|t| t.id).collect();
//! assert_eq!(ids, vec![2, 1]);
//! ```

mod criteria;
mod evaluator;
mod sort;

pub use criteria::{DateRange, QueryCriteria, DEFAULT_STATUSES};
pub use evaluator::QueryEvaluator;
pub use sort::{compare, rank};

use todolist_model::models::TodoRecord;
use tracing::debug;

/// Filters `todos` by `criteria` and returns the matches in display order.
pub fn query<'a>(todos: &'a [TodoRecord], criteria: &QueryCriteria) -> Vec<&'a TodoRecord> {
    let evaluator = QueryEvaluator::new(criteria);
    let matched = evaluator.filter_items(todos);
    debug!(total = todos.len(), matched = matched.len(), "query evaluated");
    rank(&matched)
}
