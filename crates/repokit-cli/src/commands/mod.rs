//! Command implementations for the CLI

pub mod completions;
pub mod config_cmd;
pub mod repo_rename;
