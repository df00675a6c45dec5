//! Command-line interface for isrc-minder.
//!
//! This module provides CLI commands for reconciling the missing-ISRC
//! backlog, looking up single codes, and inspecting the catalog.

mod commands;

pub use commands::{Cli, Commands, run_command};
