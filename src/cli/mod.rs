//! Command-line interface for queue-minder.
//!
//! This module provides CLI commands for inspecting and editing a queue file
//! through the grouped view, without a player attached.

mod commands;

pub use commands::{Cli, Commands, run_command};
