//! Typed dependency edges and canonical blocking arcs
//!
//! `blocks` and `blocked-by` are two surface spellings of the same
//! directed relationship. For everything that matters structurally
//! (duplicate detection, cycle checks, blocked queries) they normalize
//! to a single [`CanonicalArc`] pointing from the blocker to the
//! blocked task. `relates-to` is informational and never produces an
//! arc.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown dependency type '{0}' (expected blocks, blocked-by, or relates-to)")]
pub struct ParseDependencyTypeError(String);

/// Type of dependency between two tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    /// The `from` task must complete before the `to` task is unblocked
    #[default]
    Blocks,
    /// The `from` task is blocked by the `to` task (inverse spelling)
    BlockedBy,
    /// Tasks are related but don't block each other (informational)
    RelatesTo,
}

impl DependencyType {
    /// Returns true if edges of this type participate in the blocking
    /// graph (and therefore in cycle detection)
    pub fn is_blocking(&self) -> bool {
        !matches!(self, DependencyType::RelatesTo)
    }

    /// Returns the wire/display label for the type
    pub fn label(&self) -> &'static str {
        match self {
            DependencyType::Blocks => "blocks",
            DependencyType::BlockedBy => "blocked-by",
            DependencyType::RelatesTo => "relates-to",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DependencyType {
    type Err = ParseDependencyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocks" => Ok(DependencyType::Blocks),
            "blocked-by" => Ok(DependencyType::BlockedBy),
            "relates-to" => Ok(DependencyType::RelatesTo),
            other => Err(ParseDependencyTypeError(other.to_string())),
        }
    }
}

/// A typed dependency edge between two tasks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Source endpoint as declared by the caller
    pub from: TaskId,

    /// Target endpoint as declared by the caller
    pub to: TaskId,

    /// The type of dependency
    #[serde(rename = "type", default)]
    pub dep_type: DependencyType,

    /// When the edge was declared
    pub created_at: DateTime<Utc>,
}

impl DependencyEdge {
    /// Creates a new edge stamped with the current time
    pub fn new(from: TaskId, to: TaskId, dep_type: DependencyType) -> Self {
        Self {
            from,
            to,
            dep_type,
            created_at: Utc::now(),
        }
    }

    /// Returns the `(from, to, type)` tuple identifying this edge
    pub fn key(&self) -> (TaskId, TaskId, DependencyType) {
        (self.from.clone(), self.to.clone(), self.dep_type)
    }

    /// Returns the canonical blocking arc for this edge, or None for
    /// informational edges
    pub fn canonical_arc(&self) -> Option<CanonicalArc> {
        CanonicalArc::from_edge(&self.from, &self.to, self.dep_type)
    }

    /// Returns true if either endpoint is the given task
    pub fn touches(&self, task: &TaskId) -> bool {
        &self.from == task || &self.to == task
    }
}

/// The normalized directed arc of a blocking relationship
///
/// `blocks(A, B)` and `blocked-by(B, A)` both canonicalize to the arc
/// `A -> B` (A blocks B). Canonicalization is what makes duplicate
/// detection across surface forms and the acyclicity invariant
/// well-defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalArc {
    /// The task that must complete first
    pub blocker: TaskId,
    /// The task waiting on the blocker
    pub blocked: TaskId,
}

impl CanonicalArc {
    /// Normalizes a declared edge into its blocking arc
    pub fn from_edge(from: &TaskId, to: &TaskId, dep_type: DependencyType) -> Option<Self> {
        match dep_type {
            DependencyType::Blocks => Some(Self {
                blocker: from.clone(),
                blocked: to.clone(),
            }),
            DependencyType::BlockedBy => Some(Self {
                blocker: to.clone(),
                blocked: from.clone(),
            }),
            DependencyType::RelatesTo => None,
        }
    }
}

/// Direction selector for edge queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Edges where the task is the `from` endpoint
    Outgoing,
    /// Edges where the task is the `to` endpoint
    Incoming,
    /// Edges touching the task at either endpoint
    #[default]
    Both,
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown direction '{0}' (expected outgoing, incoming, or both)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outgoing" => Ok(Direction::Outgoing),
            "incoming" => Ok(Direction::Incoming),
            "both" => Ok(Direction::Both),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}
