//! Parse error types

use crate::token::{Span, Token, TokenKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A structural parse failure with its location.
///
/// Any error in any file aborts the whole generation run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {} column {}\nFile: {}", .span.line, .span.column, .path.display())]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// File being parsed
    pub path: PathBuf,

    /// Human-readable error message
    pub message: String,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required
    UnexpectedToken { expected: String, found: String },

    /// Input ended inside a declaration
    UnexpectedEof { expected: String },

    /// A reflection marker appeared inside another declaration
    MarkerInDeclaration { marker: TokenKind },

    /// A declaration has no name
    MissingName { what: &'static str },

    /// An enumerator initializer is not an integer
    InvalidEnumValue { text: String },
}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: impl Into<String>, found: &Token<'_>, path: &Path) -> Self {
        let expected = expected.into();

        if found.kind == TokenKind::Eof {
            return Self::unexpected_eof(expected, found.span, path);
        }

        if found.kind.is_reflection_marker() {
            return Self {
                message: format!("Expected {} but found {}", expected, found.describe()),
                kind: ParseErrorKind::MarkerInDeclaration { marker: found.kind },
                span: found.span,
                path: path.to_path_buf(),
            };
        }

        let found_text = found.describe();
        Self {
            message: format!("Expected {} but found {}", expected, found_text),
            kind: ParseErrorKind::UnexpectedToken {
                expected,
                found: found_text,
            },
            span: found.span,
            path: path.to_path_buf(),
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: impl Into<String>, span: Span, path: &Path) -> Self {
        let expected = expected.into();
        Self {
            message: format!("Unexpected end of file, expected {}", expected),
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            path: path.to_path_buf(),
        }
    }

    /// Create a "missing name" error.
    pub fn missing_name(what: &'static str, span: Span, path: &Path) -> Self {
        Self {
            message: format!("Missing {} name", what),
            kind: ParseErrorKind::MissingName { what },
            span,
            path: path.to_path_buf(),
        }
    }

    /// Create an "invalid enum value" error.
    pub fn invalid_enum_value(text: impl Into<String>, span: Span, path: &Path) -> Self {
        let text = text.into();
        Self {
            message: format!("Invalid enum value '{}'", text),
            kind: ParseErrorKind::InvalidEnumValue { text },
            span,
            path: path.to_path_buf(),
        }
    }

    /// Whether this error was caused by a misplaced reflection marker.
    pub fn is_misplaced_marker(&self) -> bool {
        matches!(self.kind, ParseErrorKind::MarkerInDeclaration { .. })
    }
}
