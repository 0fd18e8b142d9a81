//! Parser façade over OXC.
//!
//! Every place that needs a syntax tree (source classification, re-parsing
//! rewritten text) goes through [`parse`] so the source type inference and
//! diagnostic handling stay in one spot.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{DocInfoError, Result};

/// Parse options for reading source code.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Source type (TypeScript, TSX, declaration file, JavaScript).
    pub source_type: SourceType,
    /// Keep the partial tree when the parser reports errors.
    pub allow_errors: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::ts(),
            allow_errors: true,
        }
    }
}

impl ParseOptions {
    /// Create parse options from a (virtual) file name.
    ///
    /// Unknown extensions parse as TypeScript, the language the engine is
    /// tuned for.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source_type: SourceType::from_path(path.as_ref()).unwrap_or(SourceType::ts()),
            allow_errors: true,
        }
    }

    /// Reject sources that produce parser diagnostics.
    pub fn strict(mut self) -> Self {
        self.allow_errors = false;
        self
    }
}

/// Parser diagnostic, flattened to its message.
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    pub message: String,
}

/// Parsed program with its diagnostics and source text.
pub struct ParsedProgram<'a> {
    /// The parsed AST program.
    pub program: Program<'a>,
    /// Parse diagnostics (errors the parser recovered from).
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Source text the spans of `program` point into.
    pub source_text: &'a str,
}

impl<'a> ParsedProgram<'a> {
    /// Get the program AST.
    pub fn ast(&self) -> &Program<'a> {
        &self.program
    }

    /// Check if parsing had errors.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse source code into an AST.
///
/// With `allow_errors` (the default) diagnostics are returned alongside the
/// recovered tree; otherwise they become a [`DocInfoError::Parse`].
pub fn parse<'a>(
    allocator: &'a Allocator,
    path: &Path,
    source: &'a str,
    options: ParseOptions,
) -> Result<ParsedProgram<'a>> {
    let result = Parser::new(allocator, source, options.source_type).parse();

    let diagnostics: Vec<ParseDiagnostic> = result
        .errors
        .iter()
        .map(|err| ParseDiagnostic {
            message: err.to_string(),
        })
        .collect();

    if !options.allow_errors && !diagnostics.is_empty() {
        let messages: Vec<String> = diagnostics.iter().map(|d| d.message.clone()).collect();
        return Err(DocInfoError::parse_error(path, &messages));
    }

    Ok(ParsedProgram {
        program: result.program,
        diagnostics,
        source_text: source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_declaration_files() {
        let options = ParseOptions::from_path("types/options.d.ts");
        assert!(options.source_type.is_typescript_definition());
    }

    #[test]
    fn unknown_extensions_fall_back_to_typescript() {
        let options = ParseOptions::from_path("notes.txt");
        assert!(options.source_type.is_typescript());
    }

    #[test]
    fn strict_mode_rejects_broken_sources() {
        let allocator = Allocator::default();
        let result = parse(
            &allocator,
            Path::new("broken.ts"),
            "class {",
            ParseOptions::default().strict(),
        );
        assert!(matches!(result, Err(DocInfoError::Parse { .. })));
    }

    #[test]
    fn lenient_mode_keeps_diagnostics() {
        let allocator = Allocator::default();
        let parsed = parse(
            &allocator,
            Path::new("broken.ts"),
            "const a = ;",
            ParseOptions::default(),
        )
        .expect("lenient parse");
        assert!(parsed.has_errors());
    }
}
