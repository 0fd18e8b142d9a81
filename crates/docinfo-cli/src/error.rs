//! CLI errors.
//!
//! Engine failures keep their own diagnostics; the CLI adds the "nothing
//! found" outcomes, which the library reports as `None`.

use std::path::PathBuf;

use docinfo::DocInfoError;
use miette::Report;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Reading, parsing, configuration or output failed.
    #[error(transparent)]
    Engine(#[from] DocInfoError),

    /// No declaration answers the name.
    #[error("'{name}' could not be resolved from {}", path.display())]
    Unresolved { name: String, path: PathBuf },

    /// The name is not a top-level class or interface of the file.
    #[error("'{name}' is not a class or interface in {}", path.display())]
    NotExtendable { name: String, path: PathBuf },

    /// A base type of the class or interface could not be resolved.
    #[error("base types of '{name}' could not all be resolved")]
    UnresolvedBase { name: String },
}

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Engine(error) => Report::new(error),
        CliError::UnresolvedBase { name } => miette::miette!(
            help = "run with --verbose to see which base type was missing",
            "base types of '{}' could not all be resolved",
            name
        ),
        other => miette::miette!("{}", other),
    }
}
