//! Record types shared across the todolist workspace.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use todolist_model::prelude::*;
//! ```
//!
//! This re-exports [`TodoRecord`](models::TodoRecord), [`TagRecord`](models::TagRecord),
//! the [`Priority`](models::Priority) and [`Status`](models::Status) enums, and the
//! timestamp helpers used to read and write completion times.

pub mod error;
pub mod models;
pub mod prelude;
pub mod timestamp;
