//! Task identifiers
//!
//! Task ids are issued by the surrounding task store (which owns task
//! CRUD and lifecycle); this crate only references them. `TaskId` is a
//! validated newtype: non-empty, no whitespace, otherwise opaque. That
//! keeps the engine agnostic to whatever id scheme the caller uses
//! (`t-9d3e5f2`, UUIDs, plain integers as strings).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Task ID must not be empty")]
    Empty,

    #[error("Task ID must not contain whitespace: '{0}'")]
    ContainsWhitespace(String),
}

/// An opaque identifier for a task owned by an external task store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task id, validating the raw string
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdError::ContainsWhitespace(raw));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_ids() {
        assert_eq!(TaskId::new("t-9d3e5f2").unwrap().as_str(), "t-9d3e5f2");
        assert_eq!(TaskId::new("42").unwrap().as_str(), "42");
        assert_eq!(
            TaskId::new("550e8400-e29b-41d4-a716-446655440000")
                .unwrap()
                .as_str(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = TaskId::new("  t-1  ").unwrap();
        assert_eq!(id.as_str(), "t-1");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(TaskId::new(""), Err(IdError::Empty));
        assert_eq!(TaskId::new("   "), Err(IdError::Empty));
    }

    #[test]
    fn rejects_interior_whitespace() {
        assert!(matches!(
            TaskId::new("task one"),
            Err(IdError::ContainsWhitespace(_))
        ));
    }

    #[test]
    fn parses_from_str() {
        let id: TaskId = "t-1".parse().unwrap();
        assert_eq!(id.to_string(), "t-1");
    }

    #[test]
    fn serde_roundtrip() {
        let original = TaskId::new("t-1234567").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"t-1234567\"");

        let parsed: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn serde_rejects_invalid() {
        assert!(serde_json::from_str::<TaskId>("\"\"").is_err());
        assert!(serde_json::from_str::<TaskId>("\"a b\"").is_err());
    }
}
