//! Decorator list parsing
//!
//! `( Name, Name(value, value), ... )` following every reflection marker.

use super::{ParseError, Parser};
use crate::ast::{Decorator, DecoratorList};
use crate::token::TokenKind;

/// Parse a parenthesized decorator list, including both parentheses.
pub fn parse_decorator_list(parser: &mut Parser) -> Result<DecoratorList, ParseError> {
    parser.expect(TokenKind::LeftParen)?;
    let mut list = DecoratorList::new();

    while !parser.check(TokenKind::RightParen) {
        list.push(parse_decorator(parser)?);

        if !parser.eat(TokenKind::Comma) && !parser.check(TokenKind::RightParen) {
            return Err(parser.unexpected("',' or ')'"));
        }
    }

    parser.expect(TokenKind::RightParen)?;
    Ok(list)
}

fn parse_decorator(parser: &mut Parser) -> Result<Decorator, ParseError> {
    if !parser.check(TokenKind::Identifier) {
        return Err(parser.unexpected("decorator name"));
    }
    let mut decorator = Decorator::new(parser.advance().lexeme);

    if parser.eat(TokenKind::LeftParen) {
        while !parser.check(TokenKind::RightParen) {
            decorator.values.push(parse_value(parser)?);

            if !parser.eat(TokenKind::Comma) && !parser.check(TokenKind::RightParen) {
                return Err(parser.unexpected("',' or ')'"));
            }
        }
        parser.expect(TokenKind::RightParen)?;
    }

    Ok(decorator)
}

/// Parse one decorator value: a string, a number or a (qualified) name.
fn parse_value(parser: &mut Parser) -> Result<String, ParseError> {
    let tok = *parser.current();

    match tok.kind {
        TokenKind::String => {
            parser.advance();
            Ok(strip_quotes(tok.lexeme).to_string())
        }
        TokenKind::Number => {
            parser.advance();
            skip_float_suffix(parser, tok.span.end);
            Ok(tok.lexeme.to_string())
        }
        TokenKind::Minus => {
            parser.advance();
            let number = parser.expect(TokenKind::Number)?;
            skip_float_suffix(parser, number.span.end);
            Ok(format!("-{}", number.lexeme))
        }
        kind if kind.is_word() && !kind.is_reflection_marker() => {
            parser.advance();
            let mut value = tok.lexeme.to_string();
            while parser.check(TokenKind::ColonColon) {
                parser.advance();
                let next = parser.expect(TokenKind::Identifier)?;
                value.push_str("::");
                value.push_str(next.lexeme);
            }
            Ok(value)
        }
        _ => Err(parser.unexpected("decorator value")),
    }
}

/// Skip an `f`/`F` suffix glued to the number that ended at `number_end`.
fn skip_float_suffix(parser: &mut Parser, number_end: usize) {
    let next = parser.current();
    if next.span.start == number_end && (next.is_ident("f") || next.is_ident("F")) {
        parser.advance();
    }
}

fn strip_quotes(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<DecoratorList, ParseError> {
        let mut parser = Parser::from_source(source, "test.h");
        parse_decorator_list(&mut parser)
    }

    #[test]
    fn test_empty_list() {
        assert!(parse("()").unwrap().is_empty());
    }

    #[test]
    fn test_values_and_bare_names() {
        let list = parse(r#"(SourceFileFormats(png, jpg), Hidden, Tooltip("Max speed"))"#).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.values("SourceFileFormats"), ["png", "jpg"]);
        assert!(list.has("Hidden"));
        assert!(list.values("Hidden").is_empty());
        assert_eq!(list.values("Tooltip"), ["Max speed"]);
    }

    #[test]
    fn test_numeric_values() {
        let list = parse("(Range(-1.5f, 10, 2.0F), Default(EColor::Red))").unwrap();
        assert_eq!(list.values("Range"), ["-1.5", "10", "2.0"]);
        assert_eq!(list.values("Default"), ["EColor::Red"]);
    }

    #[test]
    fn test_marker_as_value_is_fatal() {
        let err = parse("(Category(GPROPERTY))").unwrap_err();
        assert!(err.is_misplaced_marker());
    }

    #[test]
    fn test_unclosed_list() {
        assert!(parse("(Hidden").is_err());
        assert!(parse("(Range(1, 2)").is_err());
    }
}
