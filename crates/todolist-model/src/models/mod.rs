//! Record types for todos and tags.
//!
//! These mirror the records held by the record store: a [`TodoRecord`] per task
//! and a [`TagRecord`] per named color tag.

mod common;
mod tag;
mod todo;

pub use common::{Priority, Status};
pub use tag::{TagRecord, DEFAULT_TAG_COLOR};
pub use todo::TodoRecord;
