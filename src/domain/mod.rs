//! Domain models for the dependency engine
//!
//! Contains the core graph logic without any I/O concerns.

mod edge;
mod engine;
mod id;
mod scope;
mod status;
mod store;

pub use edge::{CanonicalArc, DependencyEdge, DependencyType, Direction};
pub use engine::{add_dependency, compute_blocked, insert_edge, remove_dependency, BlockedResult};
pub use id::{IdError, TaskId};
pub use scope::Scope;
pub use status::TaskStatus;
pub use store::{DependencyError, DependencyStore};
