//! CLI subcommand implementations.

pub mod batch;
pub mod boost;
pub mod config;
pub mod extract;
