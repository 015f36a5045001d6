//! Workspace management
//!
//! Handles workspace initialization and provides access to the edge
//! file and config. A workspace is one scope: its edge set is fully
//! independent of every other workspace.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, EdgeFile};
use crate::domain::{DependencyEdge, Scope};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Workspace already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Not in a tether workspace. Run 'tether init' first.")]
    NotInWorkspace,
}

/// A tether workspace rooted at a `.tether` directory
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let tether_dir = root.join(".tether");

        if !tether_dir.is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Self::find_root().ok_or(WorkspaceError::NotInWorkspace)?;
        Self::open(root)
    }

    /// Initializes a new workspace at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let tether_dir = root.join(".tether");

        if tether_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root).into());
        }

        fs::create_dir_all(&tether_dir)
            .with_context(|| format!("Failed to create directory: {}", tether_dir.display()))?;

        let config = Config::default();
        config.save(&root)?;

        // Seed an empty edge file so the workspace is self-describing
        EdgeFile::for_workspace(&root).write_all(&[])?;

        Ok(Self { root, config })
    }

    /// Walks upward from the current directory looking for `.tether`
    fn find_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".tether").is_dir() {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the workspace configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the edge file for this workspace
    pub fn edge_file(&self) -> EdgeFile {
        EdgeFile::for_workspace(&self.root)
    }

    /// Loads the persisted edge list into a scope
    pub fn load_scope(&self) -> Result<Scope> {
        let edges = self.edge_file().read_all()?;
        Scope::from_edges(edges).context("Edge file failed validation")
    }

    /// Persists a scope's edges back to the workspace
    pub fn save_scope(&self, scope: &Scope) -> Result<()> {
        let edges: Vec<DependencyEdge> = scope.edges();
        self.edge_file().write_all(&edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyType, TaskId};
    use tempfile::TempDir;

    fn id(s: &str) -> TaskId {
        TaskId::new(s).unwrap()
    }

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();

        assert!(ws.root().join(".tether").is_dir());
        assert!(ws.root().join(".tether").join("config.toml").exists());
        assert!(ws.edge_file().path().exists());
    }

    #[test]
    fn init_twice_fails() {
        let dir = TempDir::new().unwrap();
        Workspace::init(dir.path()).unwrap();

        let err = Workspace::init(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn open_requires_tether_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Workspace::open(dir.path()).is_err());

        Workspace::init(dir.path()).unwrap();
        assert!(Workspace::open(dir.path()).is_ok());
    }

    #[test]
    fn scope_roundtrip_through_disk() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();

        let scope = ws.load_scope().unwrap();
        scope
            .add_dependency(&id("a"), &id("b"), DependencyType::Blocks)
            .unwrap();
        scope
            .add_dependency(&id("c"), &id("a"), DependencyType::RelatesTo)
            .unwrap();
        ws.save_scope(&scope).unwrap();

        let reloaded = ws.load_scope().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.edges(), scope.edges());
    }

    #[test]
    fn load_rejects_tampered_edge_file() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();

        // Hand-write a cyclic edge list
        let edges = vec![
            DependencyEdge::new(id("a"), id("b"), DependencyType::Blocks),
            DependencyEdge::new(id("b"), id("a"), DependencyType::Blocks),
        ];
        ws.edge_file().write_all(&edges).unwrap();

        let err = ws.load_scope().unwrap_err();
        assert!(err.to_string().contains("validation"));
    }
}
