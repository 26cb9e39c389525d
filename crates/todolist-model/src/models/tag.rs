//! Tag record.

use serde::{Deserialize, Serialize};

/// Color assigned to tags created without an explicit color.
pub const DEFAULT_TAG_COLOR: &str = "#722ed1";

/// A named, colored tag.
///
/// Todos refer to tags by name. Renaming or deleting a tag leaves existing
/// todo references untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Unique identifier assigned by the store.
    pub id: u64,

    /// Unique, trimmed tag name.
    pub name: String,

    /// Display color hint (for example `#1890ff`).
    #[serde(default = "default_color")]
    pub color: String,

    /// When the tag was created.
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

impl TagRecord {
    /// Creates a tag with the default color and no creation time.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: default_color(),
            created_at: None,
        }
    }
}
