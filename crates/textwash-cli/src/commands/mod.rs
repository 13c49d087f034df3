//! CLI command implementations

pub mod config;
pub mod labels;
pub mod run;
