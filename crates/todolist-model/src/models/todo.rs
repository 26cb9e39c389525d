//! Todo record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::common::{Priority, Status};
use crate::timestamp::parse_timestamp;

/// A single trackable task.
///
/// Records are owned by the record store; the query engine only reads them.
/// Timestamps are kept as text (see [`crate::timestamp`]) and unknown
/// priority or status values decode as the defaults, so one malformed value
/// degrades only that record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    /// Unique, immutable identifier assigned by the store.
    pub id: u64,

    /// Short title. Never empty.
    pub title: String,

    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority, 1 (low) to 3 (high).
    #[serde(default)]
    pub priority: Priority,

    /// Lifecycle status.
    #[serde(default)]
    pub status: Status,

    /// Tag names in selection order. The first tag is the primary sort key.
    /// Tags are referenced by name, not by tag id.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Paths of attached images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_paths: Vec<String>,

    /// When the todo was completed. Present only for completed todos.
    #[serde(default)]
    pub completed_at: Option<String>,

    /// When the todo was created.
    #[serde(default)]
    pub created_at: Option<String>,

    /// When the todo was last modified.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TodoRecord {
    /// Creates a pending, low-priority todo with no tags or timestamps.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: Status::default(),
            tags: Vec::new(),
            image_paths: Vec::new(),
            completed_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the first tag, if any.
    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Returns the parsed completion time.
    ///
    /// Missing and unparseable values both yield `None`.
    pub fn completed_at_time(&self) -> Option<NaiveDateTime> {
        self.completed_at.as_deref().and_then(parse_timestamp)
    }

    /// Returns the calendar day of completion.
    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.completed_at_time().map(|dt| dt.date())
    }

    /// Returns true if the status is [`Status::Completed`].
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Returns true if the record has a tag with this exact name.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }
}
