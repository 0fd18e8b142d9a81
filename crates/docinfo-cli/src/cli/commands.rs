use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available docinfo subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the classified records of a file as JSON
    Dump(DumpArgs),

    /// Resolve a name to its declaration, following imports
    ///
    /// Prints the resolution result as JSON. Fails when nothing declares the
    /// name or when every path to it runs through an import cycle.
    Resolve(ResolveArgs),

    /// Print a class or interface with its inherited members
    ///
    /// Fails when the name is not a class or interface, or when one of its
    /// base types cannot be resolved.
    Extend(ExtendArgs),

    /// Print every doc comment of a file in canonical form
    Doclets(DocletsArgs),
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Source file to classify
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Include the verbatim source of every record
    #[arg(long)]
    pub nodes: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// File the name is used in
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Name to resolve (`default` selects the default export)
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ExtendArgs {
    /// File declaring the class or interface
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Class or interface name
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DocletsArgs {
    /// Source file to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Indentation put in front of every rendered line
    #[arg(long, default_value = "")]
    pub indent: String,
}
