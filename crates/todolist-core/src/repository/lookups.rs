//! Record lookups with fuzzy "did you mean" suggestions.

use strsim::levenshtein;
use todolist_model::models::{TagRecord, TodoRecord};

use super::{Repository, RepositoryError, Result};

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Formats the "not found" error message, optionally including a suggestion.
pub(crate) fn format_not_found_error(
    resource_type: &str,
    identifier: &str,
    suggestion: Option<&str>,
) -> String {
    let base = format!("{resource_type} '{identifier}' not found.");
    match suggestion {
        Some(s) => format!("{base} Did you mean '{s}'?"),
        None => base,
    }
}

/// Finds the closest candidate name by Levenshtein distance (case-insensitive).
///
/// Returns `None` for exact matches and for candidates further than
/// [`MAX_SUGGESTION_DISTANCE`] edits away.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}

impl Repository {
    /// Returns the todo with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no todo has that id.
    pub fn todo(&self, id: u64) -> Result<&TodoRecord> {
        self.collection
            .todo(id)
            .ok_or_else(|| RepositoryError::not_found("todo", id.to_string(), None))
    }

    /// Returns the tag with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no tag has that id.
    pub fn tag(&self, id: u64) -> Result<&TagRecord> {
        self.collection
            .tag(id)
            .ok_or_else(|| RepositoryError::not_found("tag", id.to_string(), None))
    }

    /// Resolves a tag by name (case-insensitive) or numeric id.
    ///
    /// An exact-case name match wins over a case-insensitive one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound`, with a suggestion when a tag with a
    /// similar name exists.
    pub fn resolve_tag(&self, name_or_id: &str) -> Result<&TagRecord> {
        let needle = name_or_id.trim();

        if let Some(tag) = self.collection.tag_by_name(needle) {
            return Ok(tag);
        }

        let needle_lower = needle.to_lowercase();
        if let Some(tag) = self
            .collection
            .tags
            .iter()
            .find(|t| t.name.to_lowercase() == needle_lower)
        {
            return Ok(tag);
        }

        if let Some(tag) = needle.parse::<u64>().ok().and_then(|id| self.collection.tag(id)) {
            return Ok(tag);
        }

        let suggestion =
            find_similar_name(needle, self.collection.tags.iter().map(|t| t.name.as_str()));
        Err(RepositoryError::not_found("tag", needle, suggestion))
    }

    /// Suggests a known tag name close to `name`, if any.
    pub fn suggest_tag(&self, name: &str) -> Option<String> {
        find_similar_name(name, self.collection.tags.iter().map(|t| t.name.as_str()))
    }
}
