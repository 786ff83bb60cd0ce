//! Subcommand implementations.

pub mod auth;
pub mod daily;
pub mod schedule;
pub mod serve;
