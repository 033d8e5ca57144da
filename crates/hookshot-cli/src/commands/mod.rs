//! CLI command implementations

pub mod config;
pub mod script;
pub mod simulate;
