//! CLI: serve, daily trigger, authorization bootstrap, one-shot scheduling.

pub mod cli;
pub mod commands;
pub mod error;
