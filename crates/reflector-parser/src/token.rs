//! Token definitions for the reflection scanner.

use std::fmt;

/// Token kinds recognized by the lexer.
///
/// Only the subset of C++ needed to locate and read annotated declarations is
/// represented. Everything else is dropped during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Reflection markers
    PropertyMarker,
    ClassMarker,
    StructMarker,
    MethodMarker,
    EnumMarker,

    // Body anchor
    GeneratedBody,

    // Keywords
    Class,
    Struct,
    Enum,
    Const,
    Auto,

    // Literals and identifiers
    Identifier,
    Number,
    String,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Hash,

    // Operators
    Star,
    Amp,
    Less,
    Greater,
    Minus,
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    LessLessEqual,
    GreaterGreaterEqual,
    EqualEqual,
    BangEqual,
    LessEqual,
    GreaterEqual,

    Eof,
}

impl TokenKind {
    /// Whether this token introduces a reflected declaration.
    pub fn is_reflection_marker(self) -> bool {
        matches!(
            self,
            TokenKind::PropertyMarker
                | TokenKind::ClassMarker
                | TokenKind::StructMarker
                | TokenKind::MethodMarker
                | TokenKind::EnumMarker
        )
    }

    /// Whether this token is spelled as a word (identifier, keyword or number).
    ///
    /// Two adjacent word tokens need a separating space when reassembled
    /// into a type string.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Const
                | TokenKind::Auto
        ) || self.is_reflection_marker()
            || self == TokenKind::GeneratedBody
    }

    /// Fixed spelling of keyword and punctuation tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::PropertyMarker => "GPROPERTY",
            TokenKind::ClassMarker => "GCLASS",
            TokenKind::StructMarker => "GSTRUCT",
            TokenKind::MethodMarker => "GMETHOD",
            TokenKind::EnumMarker => "GENUM",
            TokenKind::GeneratedBody => "GENERATED_BODY",
            TokenKind::Class => "class",
            TokenKind::Struct => "struct",
            TokenKind::Enum => "enum",
            TokenKind::Const => "const",
            TokenKind::Auto => "auto",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Hash => "#",
            TokenKind::Star => "*",
            TokenKind::Amp => "&",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Minus => "-",
            TokenKind::Equal => "=",
            TokenKind::PlusEqual => "+=",
            TokenKind::MinusEqual => "-=",
            TokenKind::StarEqual => "*=",
            TokenKind::SlashEqual => "/=",
            TokenKind::PercentEqual => "%=",
            TokenKind::CaretEqual => "^=",
            TokenKind::AmpEqual => "&=",
            TokenKind::PipeEqual => "|=",
            TokenKind::LessLessEqual => "<<=",
            TokenKind::GreaterGreaterEqual => ">>=",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier | TokenKind::Number | TokenKind::String | TokenKind::Eof => {
                write!(f, "{}", self.as_str())
            }
            _ => write!(f, "'{}'", self.as_str()),
        }
    }
}

/// A token with its source text and location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Exact source slice. String literals keep their quotes.
    pub lexeme: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Identifier with the given spelling.
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme == text
    }

    /// Quoted rendering for error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// Source location information for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in characters.
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}
