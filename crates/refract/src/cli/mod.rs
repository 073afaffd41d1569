//! Subcommand implementations.

pub mod config;
pub mod enhance;
pub mod models;
