//! Enum parsing

use super::decorator::parse_decorator_list;
use super::{ParseError, Parser};
use crate::ast::{EnumDecl, EnumValue};
use crate::token::TokenKind;

/// Parse `GENUM(...) [;] enum [class] [API] Name [: type] { A, B = 5, ... };`.
///
/// Unassigned enumerators take the previous value plus one; the first
/// defaults to zero. Decorators are accepted but not kept.
pub fn parse_enum(parser: &mut Parser) -> Result<EnumDecl, ParseError> {
    let marker = parser.expect(TokenKind::EnumMarker)?;
    let decorators = parse_decorator_list(parser)?;
    parser.eat(TokenKind::Semicolon);
    parser.expect(TokenKind::Enum)?;

    let scoped = parser.eat(TokenKind::Class) || parser.eat(TokenKind::Struct);

    let mut name = None;
    while parser.check(TokenKind::Identifier) {
        name = Some(parser.advance());
    }
    let name = name.ok_or_else(|| parser.unexpected("enum name"))?;

    if !decorators.is_empty() {
        parser.warn(
            format!("Decorators on enum '{}' are ignored", name.lexeme),
            marker.span,
        );
    }

    // Underlying type
    if parser.eat(TokenKind::Colon) {
        while !parser.check(TokenKind::LeftBrace) {
            if parser.at_eof() || parser.check(TokenKind::Semicolon) {
                return Err(parser.unexpected("'{'"));
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::LeftBrace)?;

    let mut values = Vec::new();
    let mut next = 0i64;
    while !parser.check(TokenKind::RightBrace) {
        if !parser.check(TokenKind::Identifier) {
            return Err(parser.unexpected("enumerator name"));
        }
        let entry = parser.advance();

        let value = if parser.eat(TokenKind::Equal) {
            parse_enum_value(parser)?
        } else {
            next
        };

        values.push(EnumValue {
            name: entry.lexeme.to_string(),
            value,
        });
        next = value.saturating_add(1);

        if !parser.eat(TokenKind::Comma) && !parser.check(TokenKind::RightBrace) {
            return Err(parser.unexpected("',' or '}'"));
        }
    }

    parser.expect(TokenKind::RightBrace)?;
    parser.expect(TokenKind::Semicolon)?;

    tracing::debug!("parsed enum '{}' ({} values)", name.lexeme, values.len());
    Ok(EnumDecl {
        name: name.lexeme.to_string(),
        path: parser.path().to_path_buf(),
        values,
        scoped,
    })
}

/// Parse `[-]INT` where INT is decimal or `0x` hexadecimal.
fn parse_enum_value(parser: &mut Parser) -> Result<i64, ParseError> {
    let negative = parser.eat(TokenKind::Minus);
    let tok = parser.expect(TokenKind::Number)?;

    let text = tok.lexeme;
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => text.parse::<i64>().ok(),
    };

    let value = parsed.ok_or_else(|| ParseError::invalid_enum_value(text, tok.span, parser.path()))?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<EnumDecl, ParseError> {
        let mut parser = Parser::from_source(source, "test.h");
        parse_enum(&mut parser)
    }

    fn pairs(decl: &EnumDecl) -> Vec<(&str, i64)> {
        decl.values.iter().map(|v| (v.name.as_str(), v.value)).collect()
    }

    #[test]
    fn test_implicit_and_explicit_values() {
        let decl = parse("GENUM() enum class Color { Red, Green = 5, Blue };").unwrap();
        assert!(decl.scoped);
        assert_eq!(decl.name, "Color");
        assert_eq!(pairs(&decl), [("Red", 0), ("Green", 5), ("Blue", 6)]);
    }

    #[test]
    fn test_negative_hex_and_trailing_comma() {
        let decl = parse("GENUM(); enum Flags : uint8 { None = -1, A, B = 0x10, C, };").unwrap();
        assert!(!decl.scoped);
        assert_eq!(pairs(&decl), [("None", -1), ("A", 0), ("B", 16), ("C", 17)]);
    }

    #[test]
    fn test_export_macro_before_name() {
        let decl = parse("GENUM() enum class ENGINE_API Mode { On };").unwrap();
        assert_eq!(decl.name, "Mode");
    }

    #[test]
    fn test_non_integer_value_is_fatal() {
        let err = parse("GENUM() enum E { A = 1.5 };").unwrap_err();
        assert!(matches!(err.kind, crate::parser::ParseErrorKind::InvalidEnumValue { .. }));
        assert!(parse("GENUM() enum E { A = B };").is_err());
    }

    #[test]
    fn test_decorators_are_discarded_with_warning() {
        let mut parser = Parser::from_source("GENUM(Flags) enum E { A };", "test.h");
        assert!(parse_enum(&mut parser).is_ok());
        assert_eq!(parser.parse().diagnostics.warnings().len(), 1);
    }

    #[test]
    fn test_missing_semicolon() {
        assert!(parse("GENUM() enum E { A }").is_err());
    }
}
