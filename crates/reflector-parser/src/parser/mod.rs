//! Declaration parser
//!
//! A permissive recursive-descent scan over one file's tokens. Only the
//! declarations introduced by reflection markers are parsed; every other
//! token is skipped. The parser works on the full token vector because
//! member parsing scans forward to a statement boundary and then reads
//! backwards from it.

pub mod decorator;
pub mod enums;
pub mod error;
pub mod member;
pub mod record;

use crate::ast::FileDecls;
use crate::diagnostics::{Diagnostics, ParseWarning};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};
use std::path::{Path, PathBuf};

pub use error::{ParseError, ParseErrorKind};

/// Result of parsing one file: the declarations that could be read and
/// everything reported along the way.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub decls: FileDecls,
    pub diagnostics: Diagnostics,
}

impl ParsedFile {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Parser state for one file.
pub struct Parser<'src> {
    /// Pre-tokenized input, always ending in `Eof`
    tokens: Vec<Token<'src>>,

    /// Current position in token stream
    pos: usize,

    /// File being parsed, for error locations and declaration paths
    path: PathBuf,

    /// Accumulated errors and warnings
    diagnostics: Diagnostics,
}

impl<'src> Parser<'src> {
    /// Create a parser over already-lexed tokens.
    pub fn new(mut tokens: Vec<Token<'src>>, path: impl Into<PathBuf>) -> Self {
        if !matches!(tokens.last(), Some(tok) if tok.kind == TokenKind::Eof) {
            let eof_span = match tokens.last() {
                Some(last) => Span::new(last.span.end, last.span.end, last.span.line, last.span.column),
                None => Span::new(0, 0, 1, 1),
            };
            tokens.push(Token::new(TokenKind::Eof, "", eof_span));
        }

        Self {
            tokens,
            pos: 0,
            path: path.into(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Lex `source` and create a parser over the result.
    pub fn from_source(source: &'src str, path: impl Into<PathBuf>) -> Self {
        let (tokens, lex_errors) = Lexer::new(source).tokenize();
        let mut parser = Self::new(tokens, path);
        for error in &lex_errors {
            let warning = ParseWarning::from_lex_error(error, &parser.path);
            parser.diagnostics.push_warning(warning);
        }
        parser
    }

    /// Parse every reflected declaration in the file.
    pub fn parse(mut self) -> ParsedFile {
        let mut decls = FileDecls::new(self.path.clone());

        while !self.at_eof() {
            let start = self.pos;
            let result = match self.current().kind {
                TokenKind::ClassMarker | TokenKind::StructMarker => {
                    record::parse_record(&mut self).map(|record| decls.records.push(record))
                }
                TokenKind::EnumMarker => {
                    enums::parse_enum(&mut self).map(|decl| decls.enums.push(decl))
                }
                _ => {
                    self.advance();
                    Ok(())
                }
            };

            if let Err(err) = result {
                tracing::debug!("{err}");
                self.diagnostics.push_error(err);
                if self.pos == start {
                    self.advance();
                }
            }
        }

        ParsedFile {
            decls,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token<'src> {
        &self.tokens[self.pos]
    }

    /// Get the token at an absolute position, clamped to `Eof`.
    #[inline]
    pub fn token_at(&self, index: usize) -> &Token<'src> {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    /// Current position in the token stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jump to an absolute position, clamped to `Eof`.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len() - 1);
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token<'src> {
        let tok = self.tokens[self.pos];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token if it matches the expected kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Error for the current token not being `expected`.
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected_token(expected, self.current(), &self.path)
    }

    /// Record a non-fatal warning.
    pub fn warn(&mut self, message: impl Into<String>, span: Span) {
        let warning = ParseWarning {
            path: self.path.clone(),
            span,
            message: message.into(),
        };
        tracing::debug!("{warning}");
        self.diagnostics.push_warning(warning);
    }

    /// Record an error without abandoning the current declaration.
    pub fn report(&mut self, error: ParseError) {
        tracing::debug!("{error}");
        self.diagnostics.push_error(error);
    }
}

/// Reassemble tokens into a type string as written.
///
/// Word tokens are separated by a single space; punctuation is attached to
/// its neighbours, except that a comma is followed by a space.
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut prev: Option<TokenKind> = None;

    for tok in tokens {
        let word = tok.kind.is_word();
        // `T* const` keeps the qualifier readable
        let spaced = match prev {
            Some(TokenKind::Star | TokenKind::Amp) => word,
            Some(kind) => word && kind.is_word(),
            None => false,
        };
        if spaced {
            out.push(' ');
        }
        out.push_str(tok.lexeme);
        if tok.kind == TokenKind::Comma {
            out.push(' ');
        }
        prev = Some(tok.kind);
    }

    out
}

/// Whether an identifier is a C++ access specifier or the `virtual` keyword.
pub(crate) fn is_access_specifier(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Identifier
        && matches!(tok.lexeme, "public" | "protected" | "private" | "virtual")
}
