//! Status transitions.
//!
//! A todo is completed if and only if it has a completion time. Every status
//! change goes through [`apply_status_change`], which derives the matching
//! `completed_at` value so that callers cannot break that rule.

use chrono::NaiveDateTime;
use serde::Serialize;
use todolist_model::models::{Status, TodoRecord};
use todolist_model::timestamp::{format_timestamp, now};
use tracing::debug;

/// The fields to persist after a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    /// The new status.
    pub status: Status,
    /// The completion time to store; `None` clears it.
    pub completed_at: Option<String>,
}

impl StatusPatch {
    /// Writes the patch onto a record.
    pub fn apply_to(&self, todo: &mut TodoRecord) {
        todo.status = self.status;
        todo.completed_at = self.completed_at.clone();
    }
}

/// Computes the patch for moving `todo` to `new_status`, using the current time.
///
/// - `Completed`: `completed_at` is `explicit_completed_at` if given, otherwise now.
/// - Any other status: `completed_at` is cleared and `explicit_completed_at` is ignored.
///
/// # Example
///
/// ```
/// use todolist_core::status::apply_status_change;
/// use todolist_model::models::{Status, TodoRecord};
///
/// let todo = TodoRecord::new(1, "Send invoice");
/// let patch = apply_status_change(&todo, Status::Completed, None);
/// assert_eq!(patch.status, Status::Completed);
/// assert!(patch.completed_at.is_some());
/// ```
pub fn apply_status_change(
    todo: &TodoRecord,
    new_status: Status,
    explicit_completed_at: Option<NaiveDateTime>,
) -> StatusPatch {
    apply_status_change_at(todo, new_status, explicit_completed_at, now())
}

/// Same as [`apply_status_change`] with an injected clock.
pub fn apply_status_change_at(
    todo: &TodoRecord,
    new_status: Status,
    explicit_completed_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> StatusPatch {
    let completed_at = match new_status {
        Status::Completed => Some(format_timestamp(explicit_completed_at.unwrap_or(now))),
        _ => None,
    };

    debug!(
        id = todo.id,
        from = %todo.status,
        to = %new_status,
        completed_at = completed_at.as_deref(),
        "status change"
    );

    StatusPatch {
        status: new_status,
        completed_at,
    }
}
