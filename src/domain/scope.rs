//! Per-workspace scope
//!
//! A `Scope` is the isolation boundary: one workspace's edge set,
//! fully independent of every other workspace. It owns the store
//! behind a reader/writer lock so that mutations (which must see a
//! consistent snapshot for the cycle check) serialize against each
//! other and against queries, while read-only queries may run
//! concurrently with one another. Graphs are small (tens to low
//! hundreds of tasks), so one lock per scope is all the granularity
//! needed.
//!
//! Scopes are created when a workspace is loaded and discarded on
//! switch; there is no ambient global graph.

use parking_lot::RwLock;

use super::edge::{DependencyEdge, DependencyType, Direction};
use super::engine::{self, BlockedResult};
use super::id::TaskId;
use super::status::TaskStatus;
use super::store::{DependencyError, DependencyStore};

/// One workspace's dependency graph behind a reader/writer lock
#[derive(Debug, Default)]
pub struct Scope {
    store: RwLock<DependencyStore>,
}

impl Scope {
    /// Creates a scope with no edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a scope from a persisted edge list
    ///
    /// Every edge is re-validated through the engine, so a hand-edited
    /// or corrupted edge file cannot smuggle in a self-reference,
    /// duplicate, or cycle; the first invalid edge fails the load.
    pub fn from_edges(
        edges: impl IntoIterator<Item = DependencyEdge>,
    ) -> Result<Self, DependencyError> {
        let mut store = DependencyStore::new();
        for edge in edges {
            engine::insert_edge(&mut store, edge)?;
        }
        Ok(Self {
            store: RwLock::new(store),
        })
    }

    /// Adds a dependency; rejected atomically on self-reference,
    /// duplicate, or cycle
    pub fn add_dependency(
        &self,
        from: &TaskId,
        to: &TaskId,
        dep_type: DependencyType,
    ) -> Result<(), DependencyError> {
        engine::add_dependency(&mut self.store.write(), from, to, dep_type)
    }

    /// Removes a dependency; returns false if no such edge existed
    pub fn remove_dependency(&self, from: &TaskId, to: &TaskId, dep_type: DependencyType) -> bool {
        engine::remove_dependency(&mut self.store.write(), from, to, dep_type)
    }

    /// Cascade hook for task deletion: removes every edge touching the
    /// task. Returns the number of edges removed.
    pub fn remove_all_edges_for(&self, task: &TaskId) -> usize {
        self.store.write().remove_all_edges_for(task)
    }

    /// Returns the edges touching a task, in insertion order
    pub fn edges_of(&self, task: &TaskId, direction: Direction) -> Vec<DependencyEdge> {
        self.store.read().edges_of(task, direction)
    }

    /// Computes blocked status against the caller's status lookup
    pub fn compute_blocked<F>(&self, task: &TaskId, status_lookup: F) -> BlockedResult
    where
        F: Fn(&TaskId) -> Option<TaskStatus>,
    {
        engine::compute_blocked(&self.store.read(), task, status_lookup)
    }

    /// Snapshots all edges in insertion order (for persistence)
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.store.read().edges().to_vec()
    }

    /// Returns the number of edges in the scope
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns true if the scope has no edges
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn id(s: &str) -> TaskId {
        TaskId::new(s).unwrap()
    }

    #[test]
    fn scope_roundtrips_edges() {
        let scope = Scope::new();
        scope
            .add_dependency(&id("a"), &id("b"), DependencyType::Blocks)
            .unwrap();
        scope
            .add_dependency(&id("c"), &id("a"), DependencyType::RelatesTo)
            .unwrap();

        let edges = scope.edges();
        assert_eq!(edges.len(), 2);

        let rebuilt = Scope::from_edges(edges).unwrap();
        assert_eq!(rebuilt.len(), 2);
        assert_eq!(rebuilt.edges_of(&id("a"), Direction::Both).len(), 2);
    }

    #[test]
    fn from_edges_preserves_created_at() {
        let edge = DependencyEdge::new(id("a"), id("b"), DependencyType::Blocks);
        let stamped = edge.created_at;

        let rebuilt = Scope::from_edges(vec![edge]).unwrap();
        let edges = rebuilt.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].created_at, stamped);
    }

    #[test]
    fn from_edges_rejects_a_smuggled_cycle() {
        let edges = vec![
            DependencyEdge::new(id("a"), id("b"), DependencyType::Blocks),
            DependencyEdge::new(id("b"), id("c"), DependencyType::Blocks),
            DependencyEdge::new(id("c"), id("a"), DependencyType::Blocks),
        ];

        let result = Scope::from_edges(edges);
        assert!(matches!(
            result,
            Err(DependencyError::CircularDependency { .. })
        ));
    }

    #[test]
    fn from_edges_rejects_duplicates() {
        let edge = DependencyEdge::new(id("a"), id("b"), DependencyType::Blocks);
        let result = Scope::from_edges(vec![edge.clone(), edge]);
        assert!(matches!(result, Err(DependencyError::DuplicateEdge { .. })));
    }

    #[test]
    fn cascade_removal_via_scope() {
        let scope = Scope::new();
        scope
            .add_dependency(&id("a"), &id("b"), DependencyType::Blocks)
            .unwrap();
        scope
            .add_dependency(&id("b"), &id("c"), DependencyType::Blocks)
            .unwrap();

        assert_eq!(scope.remove_all_edges_for(&id("b")), 2);
        assert!(scope.is_empty());
    }

    #[test]
    fn concurrent_readers_with_serialized_writers() {
        let scope = Arc::new(Scope::new());
        scope
            .add_dependency(&id("seed"), &id("t0"), DependencyType::Blocks)
            .unwrap();

        let mut handles = Vec::new();

        for i in 0..4 {
            let scope = Arc::clone(&scope);
            handles.push(std::thread::spawn(move || {
                let from = id(&format!("w{}", i));
                scope
                    .add_dependency(&from, &id("t0"), DependencyType::Blocks)
                    .unwrap();
                for _ in 0..50 {
                    let result = scope.compute_blocked(&id("t0"), |_| Some(TaskStatus::Todo));
                    assert!(result.is_blocked);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // seed + one edge per writer thread
        assert_eq!(scope.len(), 5);
    }
}
