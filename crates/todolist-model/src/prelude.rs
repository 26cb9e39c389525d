//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use todolist_model::prelude::*;
//!
//! let priority: Priority = "high".parse().unwrap();
//! assert_eq!(priority, Priority::High);
//! ```

// Error types
pub use crate::error::{ModelError, Result};

// Records
pub use crate::models::{Priority, Status, TagRecord, TodoRecord};

// Timestamp helpers
pub use crate::timestamp::{format_timestamp, now, parse_timestamp, TIMESTAMP_FORMAT};
