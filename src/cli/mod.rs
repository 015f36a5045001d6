//! # Command-Line Interface
//!
//! User-facing commands over the dependency engine.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create a workspace |
//! | `add` / `rm` | Mutate dependency edges |
//! | `list` | Enumerate a task's edges |
//! | `blocked` | Derive blocked status from a status snapshot |
//! | `purge` | Cascade-remove a deleted task's edges |
//!
//! All commands support `--format text|json` and `--verbose`. Call
//! [`run()`] to parse arguments and execute.

mod app;
mod dep;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
