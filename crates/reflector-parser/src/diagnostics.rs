//! Errors and warnings accumulated while parsing.

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::token::Span;
use std::fmt;
use std::path::PathBuf;

/// A non-fatal finding: the declaration was accepted, but its shape suggests
/// a misparse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub path: PathBuf,
    pub span: Span,
    pub message: String,
}

impl ParseWarning {
    /// Report a lexical anomaly; the offending text was dropped.
    pub fn from_lex_error(error: &LexError, path: impl Into<PathBuf>) -> Self {
        let mut message = match error {
            LexError::InvalidNumber { text, .. } => format!("Malformed number '{}' ignored", text),
            LexError::UnterminatedString { .. } => "Unterminated string literal ignored".to_string(),
        };
        if let Some(hint) = error.hint() {
            message.push_str(&format!(" ({})", hint));
        }
        Self {
            path: path.into(),
            span: *error.span(),
            message,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {} column {}\nFile: {}",
            self.message,
            self.span.line,
            self.span.column,
            self.path.display()
        )
    }
}

/// Everything a parse reported, threaded through the run instead of a
/// process-wide failure flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<ParseError>,
    warnings: Vec<ParseWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn push_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
