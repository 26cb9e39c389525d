//! Display ordering for filtered todos.

use std::cmp::Ordering;

use todolist_model::models::TodoRecord;

/// Compares two todos for display.
///
/// Priority descending, then first tag ascending by ordinal (case-sensitive)
/// comparison. Untagged todos sort after every tagged todo of the same
/// priority. An empty first tag counts as untagged.
pub fn compare(a: &TodoRecord, b: &TodoRecord) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| compare_first_tags(sort_tag(a), sort_tag(b)))
}

fn sort_tag(todo: &TodoRecord) -> Option<&str> {
    todo.first_tag().filter(|tag| !tag.is_empty())
}

fn compare_first_tags(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns a new vector of `todos` in display order.
///
/// The sort is stable: todos equal under [`compare`] keep their input order.
/// The input slice is left untouched.
pub fn rank<'a>(todos: &[&'a TodoRecord]) -> Vec<&'a TodoRecord> {
    let mut ranked = todos.to_vec();
    ranked.sort_by(|a, b| compare(a, b));
    ranked
}
