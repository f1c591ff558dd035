//! Strongly-typed ID types for domain entities.
//!
//! IDs use ULID (Universally Unique Lexicographically Sortable Identifier)
//! format, providing both uniqueness and temporal ordering. Sorting tasks
//! by id therefore sorts them by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Ulid);

impl TaskId {
    /// Creates a new ID with a randomly generated ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Creates an ID from a ULID.
    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task_{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the prefixed display form and a raw ULID.
        let ulid_str = s.strip_prefix("task_").unwrap_or(s);

        Ulid::from_str(ulid_str).map(Self).map_err(|e| ParseIdError {
            id_type: "TaskId",
            reason: e.to_string(),
        })
    }
}

impl From<Ulid> for TaskId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl From<TaskId> for Ulid {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_prefix() {
        let id = TaskId::new();
        assert!(id.to_string().starts_with("task_"));
    }

    #[test]
    fn parses_prefixed_form() {
        let id = TaskId::new();
        let parsed = TaskId::from_str(&id.to_string()).expect("parse prefixed");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parses_raw_ulid() {
        let id = TaskId::new();
        let parsed = TaskId::from_str(&id.as_ulid().to_string()).expect("parse raw");
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        let err = TaskId::from_str("not-a-ulid").expect_err("should fail");
        assert_eq!(err.id_type, "TaskId");
    }

    #[test]
    fn later_ids_sort_after_earlier_ones() {
        let first = TaskId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TaskId::new();
        assert!(second.to_string() > first.to_string());
    }

    #[test]
    fn serde_roundtrip() {
        let id = TaskId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let parsed: TaskId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
