//! docinfo CLI: inspect the documentation structure of TypeScript sources.
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - Command implementations returning their stdout text
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - Tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
