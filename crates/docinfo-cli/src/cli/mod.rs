//! Command-line interface definition.
//!
//! - `docinfo dump <FILE>` - Classified records of a file as JSON
//! - `docinfo resolve <FILE> <NAME>` - Declaration a name refers to
//! - `docinfo extend <FILE> <NAME>` - Class or interface with inherited members
//! - `docinfo doclets <FILE>` - Every doc comment of a file, re-rendered

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{Command, DocletsArgs, DumpArgs, ExtendArgs, ResolveArgs};

/// docinfo - doclet-aware source information for TypeScript
#[derive(Parser, Debug)]
#[command(
    name = "docinfo",
    version,
    about = "Inspect the documentation structure of TypeScript sources",
    long_about = "docinfo classifies the declarations of a TypeScript or JavaScript file,\n\
                  attaches their doc comments, resolves names across imports and flattens\n\
                  class and interface inheritance."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to docinfo.toml or docinfo.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
