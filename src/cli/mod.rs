//! Command-line interface for smartlink.
//!
//! This module provides CLI commands for resolving music links, editing
//! smartlink pages, and reading their counters.

mod commands;

pub use commands::{Cli, Commands, FormArgs, run_command};
