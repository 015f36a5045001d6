//! JSONL persistence for the edge list
//!
//! Edges are stored in `.tether/deps.jsonl` with one JSON object per
//! line. Line order is insertion order; the file is the ordering
//! contract for `edges_of` and blocked queries, so writes must never
//! reorder it. Uses file locking for concurrent access safety and
//! temp-file + rename for atomic writes.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::DependencyEdge;

/// Store for the persisted edge list in JSONL format
pub struct EdgeFile {
    path: PathBuf,
}

impl EdgeFile {
    /// Creates an edge file handle at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default edge file for a workspace
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::new(workspace_root.join(".tether").join("deps.jsonl"))
    }

    /// Returns the path to the edge file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all edges in file (insertion) order
    pub fn read_all(&self) -> Result<Vec<DependencyEdge>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open edge file: {}", self.path.display()))?;

        // Shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on edge file")?;

        let reader = BufReader::new(&file);
        let mut edges = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let edge: DependencyEdge = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse edge at line {}", line_num + 1))?;

            edges.push(edge);
        }

        // Lock is released when file is dropped
        Ok(edges)
    }

    /// Writes all edges (full rewrite, preserving the given order)
    pub fn write_all(&self, edges: &[DependencyEdge]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on edge file")?;

            let mut writer = BufWriter::new(&file);

            for edge in edges {
                let line = serde_json::to_string(edge).context("Failed to serialize edge")?;
                writeln!(writer, "{}", line).context("Failed to write edge")?;
            }

            writer.flush().context("Failed to flush edge file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
