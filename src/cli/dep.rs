//! Dependency command implementations
//!
//! Each mutating command loads the workspace edge file into a scope,
//! applies the mutation, and writes the file back only on success, so
//! a rejected mutation leaves the file untouched.
//!
//! Task statuses reach `blocked` as a JSON snapshot file
//! (`{"<task-id>": "<status>", ...}`) exported by whatever tool owns
//! the tasks. The snapshot is read fresh on every invocation, never
//! cached.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::domain::{DependencyType, Direction, TaskId, TaskStatus};
use crate::storage::Workspace;

/// Adds a dependency edge
pub fn add(output: &Output, from: &TaskId, dep_type: DependencyType, to: &TaskId) -> Result<()> {
    let workspace = Workspace::open_current()?;
    output.verbose(&format!("Workspace: {}", workspace.root().display()));

    let scope = workspace.load_scope()?;
    scope.add_dependency(from, to, dep_type)?;
    workspace.save_scope(&scope)?;

    output.success(&format!("Added dependency: {} {} {}", from, dep_type, to));
    Ok(())
}

/// Removes a dependency edge (idempotent)
pub fn remove(output: &Output, from: &TaskId, dep_type: DependencyType, to: &TaskId) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let scope = workspace.load_scope()?;

    if scope.remove_dependency(from, to, dep_type) {
        workspace.save_scope(&scope)?;
        output.success(&format!("Removed dependency: {} {} {}", from, dep_type, to));
    } else {
        output.success(&format!("No such dependency: {} {} {}", from, dep_type, to));
    }
    Ok(())
}

/// Lists the edges touching a task
pub fn list(output: &Output, task: &TaskId, direction: Direction) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let scope = workspace.load_scope()?;

    let edges = scope.edges_of(task, direction);
    output.verbose(&format!("Found {} edges for {}", edges.len(), task));

    if output.is_json() {
        let items: Vec<_> = edges
            .iter()
            .map(|e| {
                serde_json::json!({
                    "from": e.from,
                    "to": e.to,
                    "type": e.dep_type,
                    "created_at": e.created_at,
                })
            })
            .collect();
        output.data(&items);
    } else if edges.is_empty() {
        println!("No dependencies for {}.", task);
    } else {
        println!("Dependencies of {} ({}):", task, edges.len());
        println!("{:<20} {:<12} {}", "FROM", "TYPE", "TO");
        println!("{}", "-".repeat(60));
        for edge in edges {
            println!("{:<20} {:<12} {}", edge.from, edge.dep_type, edge.to);
        }
    }

    Ok(())
}

/// Computes whether a task is blocked, using a status snapshot file
pub fn blocked(output: &Output, task: &TaskId, statuses: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let scope = workspace.load_scope()?;

    let snapshot_path = match statuses {
        Some(path) => path.to_path_buf(),
        None => workspace
            .config()
            .statuses_path(workspace.root())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No status snapshot: pass --statuses <file> or set 'statuses' in .tether/config.toml"
                )
            })?,
    };

    let snapshot = load_statuses(&snapshot_path)?;
    output.verbose(&format!(
        "Loaded {} statuses from {}",
        snapshot.len(),
        snapshot_path.display()
    ));

    let result = scope.compute_blocked(task, |id| snapshot.get(id).copied());

    if output.is_json() {
        output.data(&serde_json::json!({
            "task": task,
            "is_blocked": result.is_blocked,
            "blocking_tasks": result.blocking_tasks,
        }));
    } else if result.is_blocked {
        let blockers: Vec<_> = result.blocking_tasks.iter().map(TaskId::as_str).collect();
        println!("{} is blocked by: {}", task, blockers.join(", "));
    } else {
        println!("{} is not blocked.", task);
    }

    Ok(())
}

/// Cascade hook: removes every edge touching a deleted task
pub fn purge(output: &Output, task: &TaskId) -> Result<()> {
    let workspace = Workspace::open_current()?;
    let scope = workspace.load_scope()?;

    let removed = scope.remove_all_edges_for(task);
    if removed > 0 {
        workspace.save_scope(&scope)?;
    }

    output.success(&format!("Removed {} edges touching {}", removed, task));
    Ok(())
}

/// Initializes a workspace
pub fn init(output: &Output, path: &str) -> Result<()> {
    let workspace = Workspace::init(path)?;
    output.success(&format!(
        "Initialized tether workspace at {}",
        workspace.root().display()
    ));
    Ok(())
}

fn load_statuses(path: &Path) -> Result<HashMap<TaskId, TaskStatus>> {
    if !path.exists() {
        bail!("Status snapshot not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read status snapshot: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse status snapshot: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_snapshot_parses() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("statuses.json");
        fs::write(&path, r#"{"t-1": "in_progress", "t-2": "completed"}"#).unwrap();

        let snapshot = load_statuses(&path).unwrap();
        assert_eq!(
            snapshot.get(&TaskId::new("t-1").unwrap()),
            Some(&TaskStatus::InProgress)
        );
        assert_eq!(
            snapshot.get(&TaskId::new("t-2").unwrap()),
            Some(&TaskStatus::Completed)
        );
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_statuses(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn unknown_status_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("statuses.json");
        fs::write(&path, r#"{"t-1": "paused"}"#).unwrap();

        assert!(load_statuses(&path).is_err());
    }
}
