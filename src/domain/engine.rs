//! Dependency engine
//!
//! Cycle-safe mutation and blocked-status derivation over a
//! [`DependencyStore`]. The engine is stateless: every call is a pure
//! function of the store and (for blocked queries) the caller-supplied
//! status lookup. Nothing is cached, so callers re-query after any
//! status or edge change.
//!
//! The blocking graph itself is never materialized persistently. Each
//! cycle check builds a throwaway petgraph `DiGraph` from the store's
//! canonical arcs plus the candidate arc and walks it depth-first from
//! the candidate's source; a back edge on that walk means the mutation
//! would close a cycle and is rejected before anything is committed.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, Control, DfsEvent};
use serde::Serialize;
use std::collections::HashMap;

use super::edge::{CanonicalArc, DependencyEdge, DependencyType};
use super::id::TaskId;
use super::status::TaskStatus;
use super::store::{DependencyError, DependencyStore};

/// Result of a blocked-status query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedResult {
    /// True if at least one direct blocker is incomplete
    pub is_blocked: bool,

    /// The incomplete direct blockers, in edge insertion order
    pub blocking_tasks: Vec<TaskId>,
}

/// Adds a dependency, enforcing the acyclicity invariant
///
/// Validation order: self-reference, then canonical duplicate (either
/// surface form of the same blocking arc), then the cycle check.
/// Atomic: on any error the store is untouched. `relates-to` edges
/// skip the canonical checks entirely and can never fail with
/// `CircularDependency`.
pub fn add_dependency(
    store: &mut DependencyStore,
    from: &TaskId,
    to: &TaskId,
    dep_type: DependencyType,
) -> Result<(), DependencyError> {
    insert_edge(store, DependencyEdge::new(from.clone(), to.clone(), dep_type))
}

/// Validates and commits an existing edge, preserving its metadata
///
/// Same checks as [`add_dependency`]; used when rebuilding a store from
/// persisted edges, where the original `created_at` must survive.
pub fn insert_edge(
    store: &mut DependencyStore,
    edge: DependencyEdge,
) -> Result<(), DependencyError> {
    if edge.from == edge.to {
        return Err(DependencyError::SelfReference(edge.from.clone()));
    }

    let Some(arc) = CanonicalArc::from_edge(&edge.from, &edge.to, edge.dep_type) else {
        // Informational edge: no cycle risk, only the literal-tuple
        // duplicate rule applies (enforced by the store).
        return store.add_edge(edge);
    };

    // blocks(A,B) and blocked-by(B,A) are the same relationship; both
    // must be caught here, not just the identical tuple.
    if store.arc_exists(&arc) {
        return Err(DependencyError::DuplicateEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            dep_type: edge.dep_type,
        });
    }

    if would_create_cycle(store, &arc) {
        return Err(DependencyError::CircularDependency {
            from: edge.from.clone(),
            to: edge.to.clone(),
        });
    }

    store.add_edge(edge)
}

/// Removes a dependency
///
/// Idempotent; returns false if no such edge existed. Removal can
/// never introduce a cycle, so no check is needed.
pub fn remove_dependency(
    store: &mut DependencyStore,
    from: &TaskId,
    to: &TaskId,
    dep_type: DependencyType,
) -> bool {
    store.remove_edge(from, to, dep_type)
}

/// Computes whether a task is currently blocked from starting
///
/// Only directly declared blocking arcs are evaluated; blocking does
/// not propagate transitively through chains. The status lookup is the
/// caller's capability; `None` means the blocker no longer exists
/// (a dangling edge awaiting cascade cleanup) and is treated as
/// removed. `blocking_tasks` lists only the incomplete blockers.
pub fn compute_blocked<F>(store: &DependencyStore, task: &TaskId, status_lookup: F) -> BlockedResult
where
    F: Fn(&TaskId) -> Option<TaskStatus>,
{
    let blocking_tasks: Vec<TaskId> = store
        .blockers_of(task)
        .into_iter()
        .filter(|blocker| {
            status_lookup(blocker).is_some_and(|status| !status.is_complete())
        })
        .collect();

    BlockedResult {
        is_blocked: !blocking_tasks.is_empty(),
        blocking_tasks,
    }
}

/// Checks whether committing the candidate arc would close a cycle in
/// the blocking graph
fn would_create_cycle(store: &DependencyStore, candidate: &CanonicalArc) -> bool {
    let mut graph: DiGraph<TaskId, ()> = DiGraph::new();
    let mut nodes: HashMap<TaskId, NodeIndex> = HashMap::new();

    for arc in store.blocking_arcs() {
        let blocker = intern(&mut graph, &mut nodes, &arc.blocker);
        let blocked = intern(&mut graph, &mut nodes, &arc.blocked);
        graph.add_edge(blocker, blocked, ());
    }

    let start = intern(&mut graph, &mut nodes, &candidate.blocker);
    let end = intern(&mut graph, &mut nodes, &candidate.blocked);
    graph.add_edge(start, end, ());

    // The store was acyclic before, so any cycle must pass through the
    // candidate arc and is reachable from its source.
    depth_first_search(&graph, Some(start), |event| {
        if matches!(event, DfsEvent::BackEdge(_, _)) {
            Control::Break(())
        } else {
            Control::Continue
        }
    })
    .break_value()
    .is_some()
}

fn intern(
    graph: &mut DiGraph<TaskId, ()>,
    nodes: &mut HashMap<TaskId, NodeIndex>,
    id: &TaskId,
) -> NodeIndex {
    if let Some(&idx) = nodes.get(id) {
        return idx;
    }
    let idx = graph.add_node(id.clone());
    nodes.insert(id.clone(), idx);
    idx
}
