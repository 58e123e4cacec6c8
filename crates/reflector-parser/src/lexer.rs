//! Lexer for reflection-annotated headers.
//!
//! Built on logos. The scanner only cares about a small slice of C++: the
//! reflection markers, the keywords that follow them, the punctuation that
//! delimits declarations, and the literals used in enum values and decorator
//! arguments. Any other character is dropped.

use crate::token::{Span, Token, TokenKind};
use crate::GENERATED_HEADER_SUFFIX;
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum for lexing.
///
/// Converted to [`TokenKind`] after lexing; the malformed-literal variants
/// never leave this module.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n\f\v]+", logos::skip)]
    Whitespace,

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    // Reflection markers
    #[token("GPROPERTY")]
    PropertyMarker,

    #[token("GCLASS")]
    ClassMarker,

    #[token("GSTRUCT")]
    StructMarker,

    #[token("GMETHOD")]
    MethodMarker,

    #[token("GENUM")]
    EnumMarker,

    #[token("GENERATED_BODY")]
    GeneratedBody,

    // Keywords (must come before identifiers)
    #[token("class")]
    Class,

    #[token("struct")]
    Struct,

    #[token("enum")]
    Enum,

    #[token("const")]
    Const,

    #[token("auto")]
    Auto,

    #[regex(r"[a-zA-Z_À-ÖØ-öø-ÿ][a-zA-Z0-9_À-ÖØ-öø-ÿ]*")]
    Identifier,

    // Literals
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+\.[eE][+-]?[0-9]+")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r"[0-9]+(\.[0-9]*)?[eE][+-]?[0-9]+\.[0-9]*")]
    MalformedNumber,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedString,

    // Compound assignment
    #[token("+=")]
    PlusEqual,

    #[token("-=")]
    MinusEqual,

    #[token("*=")]
    StarEqual,

    #[token("/=")]
    SlashEqual,

    #[token("%=")]
    PercentEqual,

    #[token("^=")]
    CaretEqual,

    #[token("&=")]
    AmpEqual,

    #[token("|=")]
    PipeEqual,

    #[token("<<=")]
    LessLessEqual,

    #[token(">>=")]
    GreaterGreaterEqual,

    // Comparison
    #[token("==")]
    EqualEqual,

    #[token("!=")]
    BangEqual,

    #[token("<=")]
    LessEqual,

    #[token(">=")]
    GreaterEqual,

    // Single-character operators
    #[token("=")]
    Equal,

    #[token("*")]
    Star,

    #[token("&")]
    Amp,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("-")]
    Minus,

    // Delimiters
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token(";")]
    Semicolon,

    #[token("::")]
    ColonColon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("#")]
    Hash,
}

fn lex_block_comment(lex: &mut logos::Lexer<LogosToken>) -> logos::Skip {
    // "/*" is consumed; find the closing "*/"
    let remainder = lex.remainder();

    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
    } else {
        // Unterminated comment runs to end of input
        lex.bump(remainder.len());
    }

    logos::Skip
}

/// Lexical anomalies. Reported and dropped; they never fail a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected number literal '{text}' at line {} col {}", .span.line, .span.column)]
    InvalidNumber { text: String, span: Span },

    #[error("unexpected string literal at line {} col {}", .span.line, .span.column)]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::InvalidNumber { span, .. } | LexError::UnterminatedString { span } => span,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LexError::InvalidNumber { .. } => Some("an exponent cannot be followed by a fraction"),
            LexError::UnterminatedString { .. } => Some("add a closing quote to terminate the string"),
        }
    }
}

/// Streaming lexer over one file's text.
///
/// Yields tokens lazily and ends with exactly one [`TokenKind::Eof`]. A lexer
/// is not restartable; create a new one to scan the text again.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, LogosToken>,
    line: u32,
    column: u32,
    last_end: usize,
    errors: Vec<LexError>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: LogosToken::lexer(source),
            line: 1,
            column: 1,
            last_end: 0,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Drain the lexer, returning every token and the anomalies seen on the way.
    pub fn tokenize(mut self) -> (Vec<Token<'src>>, Vec<LexError>) {
        let tokens = self.by_ref().collect();
        (tokens, self.errors)
    }

    /// Anomalies reported so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Whether the text already includes `<stem>.generated.h`.
    pub fn includes_generated_header(&self, stem: &str) -> bool {
        let header = format!("{stem}{GENERATED_HEADER_SUFFIX}");
        self.source.contains(&header)
    }

    /// Whether any reflection marker appears outside comments and strings.
    ///
    /// Runs its own pass over the text and stops at the first marker, so it
    /// does not disturb iteration.
    pub fn has_reflection_markers(&self) -> bool {
        LogosToken::lexer(self.source).any(|tok| {
            matches!(
                tok,
                Ok(LogosToken::PropertyMarker
                    | LogosToken::ClassMarker
                    | LogosToken::StructMarker
                    | LogosToken::MethodMarker
                    | LogosToken::EnumMarker)
            )
        })
    }

    /// Advance line/column tracking up to `pos`.
    fn advance_to(&mut self, pos: usize) {
        for c in self.source[self.last_end..pos].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.last_end = pos;
    }

    fn report(&mut self, error: LexError) {
        tracing::warn!("{error}");
        self.errors.push(error);
    }

    fn convert_token(logos_token: LogosToken) -> Option<TokenKind> {
        let kind = match logos_token {
            LogosToken::PropertyMarker => TokenKind::PropertyMarker,
            LogosToken::ClassMarker => TokenKind::ClassMarker,
            LogosToken::StructMarker => TokenKind::StructMarker,
            LogosToken::MethodMarker => TokenKind::MethodMarker,
            LogosToken::EnumMarker => TokenKind::EnumMarker,
            LogosToken::GeneratedBody => TokenKind::GeneratedBody,
            LogosToken::Class => TokenKind::Class,
            LogosToken::Struct => TokenKind::Struct,
            LogosToken::Enum => TokenKind::Enum,
            LogosToken::Const => TokenKind::Const,
            LogosToken::Auto => TokenKind::Auto,
            LogosToken::Identifier => TokenKind::Identifier,
            LogosToken::Number => TokenKind::Number,
            LogosToken::String => TokenKind::String,
            LogosToken::PlusEqual => TokenKind::PlusEqual,
            LogosToken::MinusEqual => TokenKind::MinusEqual,
            LogosToken::StarEqual => TokenKind::StarEqual,
            LogosToken::SlashEqual => TokenKind::SlashEqual,
            LogosToken::PercentEqual => TokenKind::PercentEqual,
            LogosToken::CaretEqual => TokenKind::CaretEqual,
            LogosToken::AmpEqual => TokenKind::AmpEqual,
            LogosToken::PipeEqual => TokenKind::PipeEqual,
            LogosToken::LessLessEqual => TokenKind::LessLessEqual,
            LogosToken::GreaterGreaterEqual => TokenKind::GreaterGreaterEqual,
            LogosToken::EqualEqual => TokenKind::EqualEqual,
            LogosToken::BangEqual => TokenKind::BangEqual,
            LogosToken::LessEqual => TokenKind::LessEqual,
            LogosToken::GreaterEqual => TokenKind::GreaterEqual,
            LogosToken::Equal => TokenKind::Equal,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Amp => TokenKind::Amp,
            LogosToken::Less => TokenKind::Less,
            LogosToken::Greater => TokenKind::Greater,
            LogosToken::Minus => TokenKind::Minus,
            LogosToken::LeftParen => TokenKind::LeftParen,
            LogosToken::RightParen => TokenKind::RightParen,
            LogosToken::LeftBrace => TokenKind::LeftBrace,
            LogosToken::RightBrace => TokenKind::RightBrace,
            LogosToken::LeftBracket => TokenKind::LeftBracket,
            LogosToken::RightBracket => TokenKind::RightBracket,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::ColonColon => TokenKind::ColonColon,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Hash => TokenKind::Hash,
            LogosToken::MalformedNumber | LogosToken::UnterminatedString => return None,
            LogosToken::Whitespace | LogosToken::LineComment | LogosToken::BlockComment => {
                unreachable!("Whitespace and comments should be skipped")
            }
        };
        Some(kind)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }

        loop {
            let Some(result) = self.inner.next() else {
                let end = self.source.len();
                self.advance_to(end);
                self.finished = true;
                let span = Span::new(end, end, self.line, self.column);
                return Some(Token::new(TokenKind::Eof, "", span));
            };

            let range = self.inner.span();
            self.advance_to(range.start);
            let span = Span::new(range.start, range.end, self.line, self.column);
            let lexeme = &self.source[range.start..range.end];
            self.advance_to(range.end);

            match result {
                Ok(LogosToken::MalformedNumber) => {
                    self.report(LexError::InvalidNumber {
                        text: lexeme.to_string(),
                        span,
                    });
                }
                Ok(LogosToken::UnterminatedString) => {
                    self.report(LexError::UnterminatedString { span });
                }
                Ok(logos_token) => {
                    if let Some(kind) = Self::convert_token(logos_token) {
                        return Some(Token::new(kind, lexeme, span));
                    }
                }
                Err(()) => {
                    tracing::trace!(line = span.line, column = span.column, "dropped '{lexeme}'");
                }
            }
        }
    }
}
