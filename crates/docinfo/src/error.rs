use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for docinfo operations.
pub type Result<T> = std::result::Result<T, DocInfoError>;

/// Error variants surfaced by the engine.
///
/// Lookups that find nothing are not errors: they return `None`. Only the
/// conditions below stop an operation.
#[derive(Debug, Error, Diagnostic)]
pub enum DocInfoError {
    /// A file passed the existence check but could not be read.
    #[error("failed to read source '{path}': {error}")]
    #[diagnostic(code(docinfo::io))]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Strict parsing was requested and the parser reported diagnostics.
    #[error("failed to parse source '{path}': {message}")]
    #[diagnostic(code(docinfo::parse))]
    Parse {
        /// Path (or virtual name) of the parsed source.
        path: PathBuf,
        /// Aggregated parser messages.
        message: String,
    },

    /// Configuration could not be loaded or extracted.
    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(docinfo::config),
        help("check docinfo.toml and DOCINFO_* environment variables")
    )]
    Config {
        /// Human-readable reason.
        message: String,
    },

    /// A record could not be written as JSON.
    #[error("failed to serialize: {0}")]
    #[diagnostic(code(docinfo::serialize))]
    Serialize(#[from] serde_json::Error),

    /// An edit range is reversed, out of bounds or splits a character.
    #[error("invalid edit range {start}..{end} for text of length {len}")]
    #[diagnostic(code(docinfo::invalid_edit))]
    InvalidEdit { start: usize, end: usize, len: usize },

    /// Two edits of one batch cover the same text.
    #[error("edits {first:?} and {second:?} overlap")]
    #[diagnostic(code(docinfo::overlapping_edits))]
    OverlappingEdits {
        first: (usize, usize),
        second: (usize, usize),
    },
}

impl DocInfoError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: impl Into<PathBuf>, diagnostics: &[String]) -> Self {
        Self::Parse {
            path: path.into(),
            message: diagnostics.join("; "),
        }
    }

    /// Helper to wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}
