//! Task status as reported by the external task store
//!
//! The engine never owns task lifecycle; statuses arrive through a
//! lookup supplied by the caller at query time and are never cached.

use serde::{Deserialize, Serialize};

/// Status of a task, supplied by the caller's status lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
    Cancelled,
    Blocked,
}

impl TaskStatus {
    /// Returns true if this status releases the tasks it blocks
    ///
    /// Only `completed` counts. A cancelled blocker still blocks its
    /// dependents until the dependency edge is removed.
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Returns true if this task is not yet started
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Todo)
    }

    /// Returns true if this task is currently being worked on
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::InProgress | TaskStatus::Review)
    }
}
