//! # Storage Layer
//!
//! Persistence for the dependency engine with git-friendly file
//! formats.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Edges | JSONL (one JSON per line) | `.tether/deps.jsonl` |
//! | Config | TOML | `.tether/config.toml` |
//!
//! Edge-file line order is insertion order; it is the ordering
//! contract for edge enumeration, so writes never sort. All writes are
//! atomic (temp file + rename) and guarded by `fs2` file locks.
//!
//! Task data itself lives elsewhere: this tool only stores edges
//! between task ids issued by an external task store.

mod config;
mod edgefile;
mod workspace;

pub use config::Config;
pub use edgefile::EdgeFile;
pub use workspace::{Workspace, WorkspaceError};
