//! Class and struct parsing

use super::decorator::parse_decorator_list;
use super::member::{parse_method, parse_property};
use super::{is_access_specifier, join_tokens, ParseError, Parser};
use crate::ast::{DecoratorList, RecordDecl, RecordKind};
use crate::token::{Token, TokenKind};

/// Parse `GCLASS(...) [;] class [API] Name [final] [: bases] { ... };`.
///
/// The current token must be a class or struct marker.
pub fn parse_record(parser: &mut Parser) -> Result<RecordDecl, ParseError> {
    let kind = match parser.advance().kind {
        TokenKind::StructMarker => RecordKind::Struct,
        _ => RecordKind::Class,
    };

    let decorators = parse_decorator_list(parser)?;
    parser.eat(TokenKind::Semicolon);

    let keyword = match kind {
        RecordKind::Class => TokenKind::Class,
        RecordKind::Struct => TokenKind::Struct,
    };
    let keyword_tok = parser.expect(keyword)?;

    let name = parse_record_name(parser, kind, &keyword_tok)?;
    let mut record = RecordDecl::new(kind, name, parser.path().to_path_buf());
    record.decorators = decorators;

    if parser.eat(TokenKind::Colon) {
        let parents = parse_base_list(parser)?;
        if kind == RecordKind::Class {
            record.parents = parents;
        }
    }

    parse_body(parser, &mut record)?;
    parser.expect(TokenKind::Semicolon)?;

    tracing::debug!(
        "parsed {} '{}' ({} properties, {} methods)",
        kind.keyword(),
        record.name,
        record.properties.len(),
        record.methods.len()
    );
    Ok(record)
}

/// The name is the last identifier before `:` or `{`, once a trailing
/// `final` is dropped. Earlier identifiers are export macros.
fn parse_record_name(
    parser: &mut Parser,
    kind: RecordKind,
    keyword: &Token<'_>,
) -> Result<String, ParseError> {
    let mut names = Vec::new();

    while parser.check(TokenKind::Identifier) {
        names.push(parser.advance());
    }

    if !parser.check(TokenKind::Colon) && !parser.check(TokenKind::LeftBrace) {
        return Err(parser.unexpected("'{'"));
    }

    if names.len() > 1 && names.last().is_some_and(|t| t.lexeme == "final") {
        names.pop();
    }

    names
        .last()
        .map(|t| t.lexeme.to_string())
        .ok_or_else(|| ParseError::missing_name(kind.keyword(), keyword.span, parser.path()))
}

/// Parse base classes up to (not including) the opening brace.
///
/// Bases are split on top-level commas; access specifiers and `virtual`
/// are dropped and the rest of each base is joined back together, so
/// `public ns::Base<A, B>` yields `ns::Base<A, B>`.
fn parse_base_list(parser: &mut Parser) -> Result<Vec<String>, ParseError> {
    let mut parents = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut angle_depth = 0usize;

    loop {
        let tok = *parser.current();
        match tok.kind {
            TokenKind::LeftBrace => break,
            TokenKind::Eof | TokenKind::Semicolon => return Err(parser.unexpected("'{'")),
            kind if kind.is_reflection_marker() => return Err(parser.unexpected("'{'")),
            TokenKind::Less => angle_depth += 1,
            TokenKind::Greater => angle_depth = angle_depth.saturating_sub(1),
            TokenKind::Comma if angle_depth == 0 => {
                push_base(&mut parents, &current);
                current.clear();
                parser.advance();
                continue;
            }
            _ => {}
        }

        if !is_access_specifier(&tok) {
            current.push(tok);
        }
        parser.advance();
    }

    push_base(&mut parents, &current);
    Ok(parents)
}

fn push_base(parents: &mut Vec<String>, tokens: &[Token<'_>]) {
    if !tokens.is_empty() {
        parents.push(join_tokens(tokens));
    }
}

/// Scan the brace-delimited body, picking out the body anchor and member
/// markers. Member errors are reported and scanning continues with the
/// token the member parser stopped on.
fn parse_body(parser: &mut Parser, record: &mut RecordDecl) -> Result<(), ParseError> {
    parser.expect(TokenKind::LeftBrace)?;
    let mut depth = 1usize;

    loop {
        let tok = *parser.current();
        match tok.kind {
            TokenKind::Eof => return Err(parser.unexpected("'}'")),
            TokenKind::LeftBrace => {
                depth += 1;
                parser.advance();
            }
            TokenKind::RightBrace => {
                depth -= 1;
                parser.advance();
                if depth == 0 {
                    return Ok(());
                }
            }
            TokenKind::GeneratedBody => {
                if record.body_line.is_some() {
                    parser.warn(
                        format!("'{}' has more than one GENERATED_BODY()", record.name),
                        tok.span,
                    );
                }
                record.body_line = Some(tok.span.line);
                parser.advance();
            }
            TokenKind::PropertyMarker => {
                parser.advance();
                let result = parse_member_decorators(parser).and_then(|decorators| {
                    parse_property(parser).map(|mut property| {
                        property.decorators = decorators;
                        property
                    })
                });
                match result {
                    Ok(property) => record.properties.push(property),
                    Err(err) => parser.report(err),
                }
            }
            TokenKind::MethodMarker => {
                parser.advance();
                let result = parse_member_decorators(parser).and_then(|decorators| {
                    parse_method(parser).map(|mut method| {
                        method.decorators = decorators;
                        method
                    })
                });
                match result {
                    Ok(method) => record.methods.push(method),
                    Err(err) => parser.report(err),
                }
            }
            _ => {
                parser.advance();
            }
        }
    }
}

fn parse_member_decorators(parser: &mut Parser) -> Result<DecoratorList, ParseError> {
    let decorators = parse_decorator_list(parser)?;
    parser.eat(TokenKind::Semicolon);
    Ok(decorators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<RecordDecl, ParseError> {
        let mut parser = Parser::from_source(source, "test.h");
        parse_record(&mut parser)
    }

    #[test]
    fn test_export_macro_and_final() {
        let record = parse("GCLASS() class ENGINE_API Player final : public Actor { };").unwrap();
        assert_eq!(record.name, "Player");
        assert_eq!(record.parents, ["Actor"]);
    }

    #[test]
    fn test_multiple_qualified_bases() {
        let record = parse(
            "GCLASS() class Foo : public ns::Base, protected virtual Mixin<int, float> { };",
        )
        .unwrap();
        assert_eq!(record.parents, ["ns::Base", "Mixin<int, float>"]);
    }

    #[test]
    fn test_struct_ignores_bases() {
        let record = parse("GSTRUCT() struct Pod : Base { };").unwrap();
        assert!(record.is_struct());
        assert!(record.parents.is_empty());
    }

    #[test]
    fn test_body_anchor_line() {
        let record = parse("GCLASS()\nclass Foo\n{\n    GENERATED_BODY();\n};").unwrap();
        assert_eq!(record.body_line, Some(4));
    }

    #[test]
    fn test_nested_braces_in_body() {
        let record = parse(
            "GCLASS() class Foo { void F() { if (x) { y(); } } GPROPERTY() int X; };",
        )
        .unwrap();
        assert_eq!(record.properties.len(), 1);
        assert_eq!(record.properties[0].name, "X");
    }

    #[test]
    fn test_missing_trailing_semicolon() {
        assert!(parse("GCLASS() class Foo { }").is_err());
    }

    #[test]
    fn test_wrong_keyword() {
        assert!(parse("GCLASS() struct Foo { };").is_err());
    }

    #[test]
    fn test_class_decorators() {
        let record = parse("GCLASS(Abstract, Category(Gameplay)) class Foo { };").unwrap();
        assert!(record.decorators.has("Abstract"));
        assert_eq!(record.decorators.values("Category"), ["Gameplay"]);
    }
}
