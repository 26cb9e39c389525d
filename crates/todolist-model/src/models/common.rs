//! Enumerations shared by todo records and query criteria.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ModelError;

/// Priority of a todo.
///
/// Stored as its ordinal (1-3). Ordering follows importance, so
/// `Priority::High > Priority::Medium > Priority::Low`. An unknown stored
/// value decodes as the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Priority {
    /// Low priority (1). The default for new todos.
    #[default]
    Low = 1,
    /// Medium priority (2).
    Medium = 2,
    /// High priority (3).
    High = 3,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Returns the stored ordinal.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(ModelError::invalid_priority(other.to_string())),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    /// Parses a priority from its name (case-insensitive) or ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Ok(Priority::Low),
            "medium" | "2" => Ok(Priority::Medium),
            "high" | "3" => Ok(Priority::High),
            _ => Err(ModelError::invalid_priority(s)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a todo.
///
/// Stored as its ordinal (0-3). Statuses carry no ordering; `Completed` is the
/// only status that has a completion timestamp. An unknown stored value
/// decodes as the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Status {
    /// Not started (0). The default for new todos.
    #[default]
    Pending = 0,
    /// Being worked on (1).
    InProgress = 1,
    /// Finished (2).
    Completed = 2,
    /// Abandoned (3).
    Cancelled = 3,
}

impl Status {
    /// All statuses in ordinal order.
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Cancelled,
    ];

    /// Returns the stored ordinal.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Returns the kebab-case display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::Pending),
            1 => Ok(Status::InProgress),
            2 => Ok(Status::Completed),
            3 => Ok(Status::Cancelled),
            other => Err(ModelError::invalid_status(other.to_string())),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.value()
    }
}

impl FromStr for Status {
    type Err = ModelError;

    /// Parses a status from its name (case-insensitive, `-`/`_` interchangeable)
    /// or ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pending" | "todo" | "0" => Ok(Status::Pending),
            "in-progress" | "inprogress" | "doing" | "1" => Ok(Status::InProgress),
            "completed" | "done" | "2" => Ok(Status::Completed),
            "cancelled" | "canceled" | "3" => Ok(Status::Cancelled),
            _ => Err(ModelError::invalid_status(s)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enums stored as a small ordinal.
trait Ordinal: Copy + Default + FromStr + TryFrom<u8> {
    const KIND: &'static str;
}

impl Ordinal for Priority {
    const KIND: &'static str = "priority";
}

impl Ordinal for Status {
    const KIND: &'static str = "status";
}

fn fallback<T: Ordinal>(raw: impl fmt::Display) -> T {
    let value = T::default();
    warn!(kind = T::KIND, value = %raw, "unknown stored value, using default");
    value
}

/// Decodes an ordinal or a name, degrading unknown values to the default.
struct OrdinalVisitor<T>(PhantomData<T>);

impl<'de, T: Ordinal> Visitor<'de> for OrdinalVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} ordinal or name", T::KIND)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        Ok(u8::try_from(v)
            .ok()
            .and_then(|v| T::try_from(v).ok())
            .unwrap_or_else(|| fallback(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Ok(fallback(v)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<T, E> {
        Ok(fallback(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        Ok(v.parse().unwrap_or_else(|_| fallback(v)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<T, E> {
        Ok(fallback(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrdinalVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrdinalVisitor(PhantomData))
    }
}
