//! Query engine and local record store for todolist.
//!
//! The heart of this crate is the [`query`] module: a pure filter-then-sort
//! pipeline from a todo collection and a set of [`QueryCriteria`](query::QueryCriteria)
//! to the ordered view a user acts on. Around it sit the pieces that keep the
//! records themselves consistent:
//!
//! - [`Collection`] - the in-memory snapshot of all todo and tag records
//! - [`CollectionStore`] - JSON persistence of a collection
//! - [`Repository`] - create/update/delete of todos and tags over a store
//! - [`status`] - the status transition rule that keeps `completed_at` in step
//! - [`import`] - markdown checklist import
//! - [`stats`] - summary counts for a collection

use serde::{Deserialize, Serialize};
use todolist_model::models::{TagRecord, TodoRecord};

pub mod import;
pub mod query;
pub mod repository;
pub mod stats;
pub mod status;
mod store;

pub use repository::{Repository, RepositoryError, Result as RepositoryResult};
pub use store::{CollectionStore, CollectionStoreError, Result as StoreResult};

/// Current on-disk schema version of a collection.
pub const COLLECTION_VERSION: u32 = 1;

/// All todo and tag records held by the store.
///
/// Ids are allocated from monotonically increasing counters so that an id is
/// never reused after its record is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Schema version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Todo records, in creation order.
    #[serde(default)]
    pub todos: Vec<TodoRecord>,

    /// Tag records, in creation order.
    #[serde(default)]
    pub tags: Vec<TagRecord>,

    /// Next id to hand out for a todo.
    #[serde(default = "first_id")]
    pub next_todo_id: u64,

    /// Next id to hand out for a tag.
    #[serde(default = "first_id")]
    pub next_tag_id: u64,
}

fn default_version() -> u32 {
    COLLECTION_VERSION
}

fn first_id() -> u64 {
    1
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            version: COLLECTION_VERSION,
            todos: Vec::new(),
            tags: Vec::new(),
            next_todo_id: first_id(),
            next_tag_id: first_id(),
        }
    }

    /// Returns true if there are no todos and no tags.
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty() && self.tags.is_empty()
    }

    /// Allocates the next todo id.
    ///
    /// Never returns an id already held by a record, even if the counter was
    /// left behind by a hand-edited file.
    pub fn allocate_todo_id(&mut self) -> u64 {
        let floor = self.todos.iter().map(|t| t.id + 1).max().unwrap_or(1);
        let id = self.next_todo_id.max(floor);
        self.next_todo_id = id + 1;
        id
    }

    /// Allocates the next tag id.
    pub fn allocate_tag_id(&mut self) -> u64 {
        let floor = self.tags.iter().map(|t| t.id + 1).max().unwrap_or(1);
        let id = self.next_tag_id.max(floor);
        self.next_tag_id = id + 1;
        id
    }

    /// Finds a todo by id.
    pub fn todo(&self, id: u64) -> Option<&TodoRecord> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Finds a tag by id.
    pub fn tag(&self, id: u64) -> Option<&TagRecord> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Finds a tag by exact name.
    pub fn tag_by_name(&self, name: &str) -> Option<&TagRecord> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Returns tags sorted by name.
    pub fn tags_by_name(&self) -> Vec<&TagRecord> {
        let mut tags: Vec<&TagRecord> = self.tags.iter().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_new_defaults() {
        let collection = Collection::new();
        assert_eq!(collection.version, COLLECTION_VERSION);
        assert!(collection.is_empty());
        assert_eq!(collection.next_todo_id, 1);
        assert_eq!(collection.next_tag_id, 1);
    }

    #[test]
    fn test_allocate_todo_id_is_monotonic() {
        let mut collection = Collection::new();
        assert_eq!(collection.allocate_todo_id(), 1);
        assert_eq!(collection.allocate_todo_id(), 2);
        assert_eq!(collection.next_todo_id, 3);
    }

    #[test]
    fn test_allocate_todo_id_skips_existing_records() {
        let mut collection = Collection::new();
        collection.todos.push(TodoRecord::new(41, "imported"));

        // Counter says 1 but a record already owns 41
        assert_eq!(collection.allocate_todo_id(), 42);
    }

    #[test]
    fn test_allocate_does_not_reuse_deleted_ids() {
        let mut collection = Collection::new();
        let id = collection.allocate_todo_id();
        collection.todos.push(TodoRecord::new(id, "a"));
        collection.todos.clear();

        assert_eq!(collection.allocate_todo_id(), 2);
    }

    #[test]
    fn test_allocate_tag_id() {
        let mut collection = Collection::new();
        collection.tags.push(TagRecord::new(5, "work"));
        assert_eq!(collection.allocate_tag_id(), 6);
        assert_eq!(collection.allocate_tag_id(), 7);
    }

    #[test]
    fn test_tags_by_name_sorted() {
        let mut collection = Collection::new();
        collection.tags.push(TagRecord::new(1, "zeta"));
        collection.tags.push(TagRecord::new(2, "alpha"));
        collection.tags.push(TagRecord::new(3, "Beta"));

        let names: Vec<&str> = collection
            .tags_by_name()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Beta", "alpha", "zeta"]);
    }

    #[test]
    fn test_lookup_helpers() {
        let mut collection = Collection::new();
        collection.todos.push(TodoRecord::new(1, "a"));
        collection.tags.push(TagRecord::new(9, "home"));

        assert!(collection.todo(1).is_some());
        assert!(collection.todo(2).is_none());
        assert_eq!(collection.tag(9).map(|t| t.name.as_str()), Some("home"));
        assert!(collection.tag_by_name("home").is_some());
        assert!(collection.tag_by_name("Home").is_none());
    }

    #[test]
    fn test_collection_deserialize_minimal() {
        let collection: Collection = serde_json::from_str("{}").unwrap();
        assert_eq!(collection, Collection::new());
    }

    #[test]
    fn test_collection_serde_roundtrip() {
        let mut collection = Collection::new();
        let id = collection.allocate_todo_id();
        let mut todo = TodoRecord::new(id, "Buy milk");
        todo.tags = vec!["shopping".to_string()];
        collection.todos.push(todo);
        let tag_id = collection.allocate_tag_id();
        collection.tags.push(TagRecord::new(tag_id, "shopping"));

        let json = serde_json::to_string_pretty(&collection).unwrap();
        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
