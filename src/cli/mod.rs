//! CLI module for the plan summary tool.
//!
//! This module provides the command-line interface and output handling.

mod commands;
mod output;

pub use commands::{Cli, OutputFormat};
pub use output::{OutputFormatter, write_output};
