//! Reflector source scanner
//!
//! Lexer and declaration parser for C++ headers annotated with reflection
//! markers (`GCLASS`, `GSTRUCT`, `GENUM`, `GPROPERTY`, `GMETHOD`).

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    Decorator, DecoratorList, EnumDecl, EnumValue, FileDecls, MethodDecl, PropertyDecl,
    RecordDecl, RecordKind,
};
pub use diagnostics::{Diagnostics, ParseWarning};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, ParsedFile, Parser};
pub use token::{Span, Token, TokenKind};

use std::path::Path;

/// Suffix appended to a header's file stem to name its generated counterpart.
pub const GENERATED_HEADER_SUFFIX: &str = ".generated.h";

/// Lex and parse one file.
pub fn parse_source(source: &str, path: impl AsRef<Path>) -> ParsedFile {
    Parser::from_source(source, path.as_ref()).parse()
}
