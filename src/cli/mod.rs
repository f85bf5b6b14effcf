//! Command-line interface for simplecast-source.
//!
//! This module provides CLI commands for running a sourcing pass, fetching
//! individual resources and inspecting the generated schema and config.

mod commands;

pub use commands::{ApiArgs, Cli, Commands, run_command};
