//! Tachtu CLI library
//!
//! Command-line front end over `tachtu-engine`: reads texts, segments them
//! line by line and prints tokens in one of several formats.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
