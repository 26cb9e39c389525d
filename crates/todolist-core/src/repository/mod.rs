//! Create, update and delete todos and tags over a [`CollectionStore`].
//!
//! The `Repository` owns an in-memory [`Collection`] loaded from its store and
//! writes the whole collection back after every mutation. Every status change,
//! including the initial one on create, goes through
//! [`apply_status_change`](crate::status::apply_status_change) so a stored
//! todo is completed exactly when it has a completion time.
//!
//! # Example
//!
//! ```no_run
//! use todolist_core::repository::NewTodo;
//! use todolist_core::{CollectionStore, Repository};
//! use todolist_model::models::{Priority, Status};
//!
//! let store = CollectionStore::with_path("/tmp/todolist.json");
//! let mut repo = Repository::open(store)?;
//!
//! let todo = repo.create_todo(
//!     NewTodo::new("Renew passport")
//!         .with_priority(Priority::High)
//!         .with_tags(["admin"]),
//! )?;
//! repo.set_status(todo.id, Status::Completed, None)?;
//! # Ok::<(), todolist_core::RepositoryError>(())
//! ```

use chrono::NaiveDateTime;
use todolist_model::models::{Priority, Status, TagRecord, TodoRecord, DEFAULT_TAG_COLOR};
use todolist_model::timestamp::{format_timestamp, now};
use tracing::debug;

use crate::import::{self, ImportReport};
use crate::query::{self, QueryCriteria};
use crate::stats::Summary;
use crate::status::apply_status_change_at;
use crate::{Collection, CollectionStore, CollectionStoreError};

mod lookups;

use lookups::format_not_found_error;

/// Errors that can occur in repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("store error: {0}")]
    Store(#[from] CollectionStoreError),

    /// A record was not found.
    #[error("{}", format_not_found_error(resource_type, identifier, suggestion.as_deref()))]
    NotFound {
        /// The kind of record ("todo" or "tag").
        resource_type: &'static str,
        /// The id or name that was looked up.
        identifier: String,
        /// A similar existing name, if any.
        suggestion: Option<String>,
    },

    /// The requested change is not allowed.
    #[error("{0}")]
    Validation(String),
}

impl RepositoryError {
    pub(crate) fn not_found(
        resource_type: &'static str,
        identifier: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self::NotFound {
            resource_type,
            identifier: identifier.into(),
            suggestion,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Fields for a new todo.
///
/// Unset fields default to low priority and pending status.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub tags: Vec<String>,
    pub image_paths: Vec<String>,
    /// Completion time; only used when `status` is completed.
    pub completed_at: Option<NaiveDateTime>,
    /// Creation time; defaults to now.
    pub created_at: Option<NaiveDateTime>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_completed_at(mut self, at: NaiveDateTime) -> Self {
        self.completed_at = Some(at);
        self
    }

    pub fn with_created_at(mut self, at: NaiveDateTime) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// A partial update to a todo. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// Replaces the whole tag list.
    pub tags: Option<Vec<String>>,
    /// Replaces the whole image list.
    pub image_paths: Option<Vec<String>>,
    /// Completion time; ignored unless the resulting status is completed.
    pub completed_at: Option<NaiveDateTime>,
}

impl TodoPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A partial update to a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Record store with todo and tag mutations.
///
/// `Repository` is not internally synchronized. Methods that mutate take
/// `&mut self` and save the collection before returning.
#[derive(Debug)]
pub struct Repository {
    store: CollectionStore,
    collection: Collection,
}

impl Repository {
    /// Opens a repository, starting empty if the store has no file yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the file exists but cannot be read
    /// or parsed.
    pub fn open(store: CollectionStore) -> Result<Self> {
        let collection = store.load_or_default()?;
        debug!(
            path = %store.path().display(),
            todos = collection.todos.len(),
            tags = collection.tags.len(),
            "opened repository"
        );
        Ok(Self { store, collection })
    }

    /// Async equivalent of [`open()`](Self::open).
    pub async fn open_async(store: CollectionStore) -> Result<Self> {
        let collection = store.load_or_default_async().await?;
        debug!(
            path = %store.path().display(),
            todos = collection.todos.len(),
            tags = collection.tags.len(),
            "opened repository"
        );
        Ok(Self { store, collection })
    }

    /// Returns the backing store.
    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Returns the current collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Returns all todos in creation order.
    pub fn todos(&self) -> &[TodoRecord] {
        &self.collection.todos
    }

    /// Returns all tags sorted by name.
    pub fn tags(&self) -> Vec<&TagRecord> {
        self.collection.tags_by_name()
    }

    /// Runs a query against the current todos.
    pub fn query(&self, criteria: &QueryCriteria) -> Vec<&TodoRecord> {
        query::query(&self.collection.todos, criteria)
    }

    /// Summarizes the current todos.
    pub fn summary(&self) -> Summary {
        Summary::from_todos(&self.collection.todos)
    }

    // =========================================================================
    // Todos
    // =========================================================================

    /// Creates a todo. Tags that do not exist yet are created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the title is blank, or
    /// `RepositoryError::Store` if saving fails.
    pub fn create_todo(&mut self, new: NewTodo) -> Result<TodoRecord> {
        let todo = self.insert_todo(new, now())?;
        self.persist()?;
        debug!(id = todo.id, title = %todo.title, "created todo");
        Ok(todo)
    }

    /// Applies a partial update to a todo.
    ///
    /// A change of status, or a completion time on its own, is resolved
    /// through the status transition rule against the resulting status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id,
    /// `RepositoryError::Validation` for a blank title, or
    /// `RepositoryError::Store` if saving fails.
    pub fn update_todo(&mut self, id: u64, patch: TodoPatch) -> Result<TodoRecord> {
        self.todo(id)?;
        let title = patch.title.as_deref().map(normalize_title).transpose()?;
        let tags = patch.tags.as_deref().map(|names| self.ensure_tags(names));
        let stamp = now();

        let todo = self.todo_mut(id)?;
        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description.and_then(normalize_description);
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(tags) = tags {
            todo.tags = tags;
        }
        if let Some(paths) = patch.image_paths {
            todo.image_paths = paths;
        }
        if patch.status.is_some() || patch.completed_at.is_some() {
            let target = patch.status.unwrap_or(todo.status);
            apply_status_change_at(todo, target, patch.completed_at, stamp).apply_to(todo);
        }
        todo.updated_at = Some(format_timestamp(stamp));

        let updated = todo.clone();
        self.persist()?;
        debug!(id, "updated todo");
        Ok(updated)
    }

    /// Moves a todo to `status`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id or
    /// `RepositoryError::Store` if saving fails.
    pub fn set_status(
        &mut self,
        id: u64,
        status: Status,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<TodoRecord> {
        self.update_todo(
            id,
            TodoPatch {
                status: Some(status),
                completed_at,
                ..TodoPatch::default()
            },
        )
    }

    /// Deletes a todo and returns it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id or
    /// `RepositoryError::Store` if saving fails.
    pub fn delete_todo(&mut self, id: u64) -> Result<TodoRecord> {
        let index = self
            .collection
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| RepositoryError::not_found("todo", id.to_string(), None))?;
        let removed = self.collection.todos.remove(index);
        self.persist()?;
        debug!(id, "deleted todo");
        Ok(removed)
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Creates a tag, or returns the existing tag with the same name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the name is blank, or
    /// `RepositoryError::Store` if saving fails.
    pub fn create_tag(&mut self, name: &str, color: Option<String>) -> Result<TagRecord> {
        let name = normalize_tag_name(name)?;

        if let Some(existing) = self.collection.tag_by_name(&name) {
            debug!(id = existing.id, name = %existing.name, "tag already exists");
            return Ok(existing.clone());
        }

        let tag = self.insert_tag(name, color, now());
        self.persist()?;
        debug!(id = tag.id, name = %tag.name, "created tag");
        Ok(tag)
    }

    /// Renames or recolors a tag. Todos keep the names they already carry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id,
    /// `RepositoryError::Validation` for a blank name or a name held by another
    /// tag, or `RepositoryError::Store` if saving fails.
    pub fn update_tag(&mut self, id: u64, patch: TagPatch) -> Result<TagRecord> {
        let name = patch.name.as_deref().map(normalize_tag_name).transpose()?;

        if let Some(name) = &name {
            if self
                .collection
                .tags
                .iter()
                .any(|t| t.id != id && &t.name == name)
            {
                return Err(RepositoryError::Validation(format!(
                    "tag name '{name}' is already in use"
                )));
            }
        }

        let tag = self
            .collection
            .tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RepositoryError::not_found("tag", id.to_string(), None))?;
        if let Some(name) = name {
            tag.name = name;
        }
        if let Some(color) = patch.color {
            tag.color = color;
        }

        let updated = tag.clone();
        self.persist()?;
        debug!(id, name = %updated.name, "updated tag");
        Ok(updated)
    }

    /// Deletes a tag and returns it. Todos keep the name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id or
    /// `RepositoryError::Store` if saving fails.
    pub fn delete_tag(&mut self, id: u64) -> Result<TagRecord> {
        let index = self
            .collection
            .tags
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| RepositoryError::not_found("tag", id.to_string(), None))?;
        let removed = self.collection.tags.remove(index);
        self.persist()?;
        debug!(id, name = %removed.name, "deleted tag");
        Ok(removed)
    }

    // =========================================================================
    // Import
    // =========================================================================

    /// Imports a markdown checklist and saves once at the end.
    ///
    /// Completed lines without a `✅` date are stamped with their creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if saving fails.
    pub fn import_markdown(&mut self, text: &str) -> Result<ImportReport> {
        let parsed = import::parse_document(text);
        let tags_before = self.collection.tags.len();
        let stamp = now();
        let mut report = ImportReport {
            skipped: parsed.skipped,
            ..ImportReport::default()
        };

        for item in parsed.todos {
            let created_at = item.created_at.unwrap_or(stamp);
            let completed_at = match item.status {
                Status::Completed => Some(item.completed_at.unwrap_or(created_at)),
                _ => None,
            };
            let new = NewTodo {
                title: item.title,
                description: item.description,
                priority: item.priority,
                status: item.status,
                tags: item.tags,
                image_paths: Vec::new(),
                completed_at,
                created_at: Some(created_at),
            };
            let todo = self.insert_todo(new, stamp)?;
            report.imported.push(todo.id);
        }

        report.tags_created = self.collection.tags.len() - tags_before;
        if !report.imported.is_empty() {
            self.persist()?;
        }

        debug!(
            imported = report.imported_count(),
            skipped = report.skipped_count(),
            tags_created = report.tags_created,
            "imported checklist"
        );
        Ok(report)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn todo_mut(&mut self, id: u64) -> Result<&mut TodoRecord> {
        self.collection
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RepositoryError::not_found("todo", id.to_string(), None))
    }

    fn insert_todo(&mut self, new: NewTodo, stamp: NaiveDateTime) -> Result<TodoRecord> {
        let title = normalize_title(&new.title)?;
        let tags = self.ensure_tags(&new.tags);
        let id = self.collection.allocate_todo_id();

        let mut todo = TodoRecord::new(id, title);
        todo.description = new.description.and_then(normalize_description);
        todo.priority = new.priority;
        todo.tags = tags;
        todo.image_paths = new.image_paths;
        todo.created_at = Some(format_timestamp(new.created_at.unwrap_or(stamp)));
        todo.updated_at = Some(format_timestamp(stamp));
        apply_status_change_at(&todo, new.status, new.completed_at, stamp).apply_to(&mut todo);

        self.collection.todos.push(todo.clone());
        Ok(todo)
    }

    fn insert_tag(&mut self, name: String, color: Option<String>, stamp: NaiveDateTime) -> TagRecord {
        let id = self.collection.allocate_tag_id();
        let mut tag = TagRecord::new(id, name);
        tag.color = color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
        tag.created_at = Some(format_timestamp(stamp));
        self.collection.tags.push(tag.clone());
        tag
    }

    /// Normalizes a todo's tag names and creates any missing tag records.
    ///
    /// Names are trimmed, blanks dropped and duplicates removed, keeping the
    /// first occurrence.
    fn ensure_tags(&mut self, names: &[String]) -> Vec<String> {
        let mut normalized: Vec<String> = Vec::with_capacity(names.len());
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if !normalized.iter().any(|n| n == name) {
                normalized.push(name.to_string());
            }
        }

        let stamp = now();
        for name in &normalized {
            if self.collection.tag_by_name(name).is_none() {
                let tag = self.insert_tag(name.clone(), None, stamp);
                debug!(id = tag.id, name = %tag.name, "created tag for todo");
            }
        }

        normalized
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.collection)?;
        Ok(())
    }
}

fn normalize_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(RepositoryError::Validation(
            "todo title cannot be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

fn normalize_description(description: String) -> Option<String> {
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn normalize_tag_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::Validation(
            "tag name cannot be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests;
