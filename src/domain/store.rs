//! Dependency store
//!
//! Owns the authoritative edge set for one scope (a single
//! workspace/user). Edges are kept in insertion order so enumeration
//! is deterministic; a tuple index gives O(1) membership checks. The
//! store enforces the local invariants (no self-edges, no duplicate
//! tuples) but never checks cycles — that is the engine's job, run
//! before a blocking edge is committed here.

use std::collections::HashSet;
use thiserror::Error;

use super::edge::{CanonicalArc, DependencyEdge, DependencyType, Direction};
use super::id::TaskId;

/// Validation failures for dependency mutations
///
/// All three are caller-input errors, rejected synchronously with the
/// store untouched. None are retryable.
#[derive(Debug, Error, PartialEq)]
pub enum DependencyError {
    #[error("Self-dependency not allowed: {0}")]
    SelfReference(TaskId),

    #[error("Dependency already exists: {from} {dep_type} {to}")]
    DuplicateEdge {
        from: TaskId,
        to: TaskId,
        dep_type: DependencyType,
    },

    #[error("Adding dependency would create a cycle: {from} -> {to}")]
    CircularDependency { from: TaskId, to: TaskId },
}

/// The edge set for one workspace scope
#[derive(Debug, Default)]
pub struct DependencyStore {
    /// Edges in insertion order
    edges: Vec<DependencyEdge>,

    /// Membership index keyed by the `(from, to, type)` tuple
    index: HashSet<(TaskId, TaskId, DependencyType)>,
}

impl DependencyStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge, rejecting self-references and duplicate tuples
    ///
    /// Does not check cycles; callers go through the engine for that.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Result<(), DependencyError> {
        if edge.from == edge.to {
            return Err(DependencyError::SelfReference(edge.from));
        }

        if self.index.contains(&edge.key()) {
            return Err(DependencyError::DuplicateEdge {
                from: edge.from,
                to: edge.to,
                dep_type: edge.dep_type,
            });
        }

        self.index.insert(edge.key());
        self.edges.push(edge);
        Ok(())
    }

    /// Removes the edge with the exact `(from, to, type)` tuple
    ///
    /// Idempotent: returns false if no such edge existed.
    pub fn remove_edge(&mut self, from: &TaskId, to: &TaskId, dep_type: DependencyType) -> bool {
        let key = (from.clone(), to.clone(), dep_type);
        if !self.index.remove(&key) {
            return false;
        }

        let pos = self
            .edges
            .iter()
            .position(|e| &e.from == from && &e.to == to && e.dep_type == dep_type);
        if let Some(pos) = pos {
            self.edges.remove(pos);
        }
        true
    }

    /// Removes every edge touching the task at either endpoint,
    /// regardless of type. Cascade hook for task deletion.
    ///
    /// Returns the number of edges removed.
    pub fn remove_all_edges_for(&mut self, task: &TaskId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(task));
        self.index.retain(|(from, to, _)| from != task && to != task);
        before - self.edges.len()
    }

    /// Returns true if the exact `(from, to, type)` tuple is present
    pub fn contains(&self, from: &TaskId, to: &TaskId, dep_type: DependencyType) -> bool {
        self.index.contains(&(from.clone(), to.clone(), dep_type))
    }

    /// Returns true if the canonical arc exists in either surface form
    pub fn arc_exists(&self, arc: &CanonicalArc) -> bool {
        self.contains(&arc.blocker, &arc.blocked, DependencyType::Blocks)
            || self.contains(&arc.blocked, &arc.blocker, DependencyType::BlockedBy)
    }

    /// Returns the edges touching a task, filtered by direction, in
    /// insertion order
    pub fn edges_of(&self, task: &TaskId, direction: Direction) -> Vec<DependencyEdge> {
        self.edges
            .iter()
            .filter(|e| match direction {
                Direction::Outgoing => &e.from == task,
                Direction::Incoming => &e.to == task,
                Direction::Both => e.touches(task),
            })
            .cloned()
            .collect()
    }

    /// Iterates the canonical arcs of all blocking edges, in insertion
    /// order
    pub fn blocking_arcs(&self) -> impl Iterator<Item = CanonicalArc> + '_ {
        self.edges.iter().filter_map(DependencyEdge::canonical_arc)
    }

    /// Returns the tasks that directly block the given task, in
    /// insertion order of the declaring edges
    pub fn blockers_of(&self, task: &TaskId) -> Vec<TaskId> {
        self.blocking_arcs()
            .filter(|arc| &arc.blocked == task)
            .map(|arc| arc.blocker)
            .collect()
    }

    /// Returns all edges in insertion order
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Returns the number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the store has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
