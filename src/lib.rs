//! Tether - a local-first task dependency engine
//!
//! Tether tracks typed dependencies (`blocks`, `blocked-by`,
//! `relates-to`) between tasks owned by an external task store. It
//! rejects cycles in the blocking graph at mutation time and derives
//! per-task blocked status from a caller-supplied status lookup.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{
    BlockedResult, DependencyEdge, DependencyError, DependencyStore, DependencyType, Direction,
    Scope, TaskId, TaskStatus,
};
