//! Property and method parsing
//!
//! Both scan forward from the first token after the marker's decorator list
//! to the statement boundary, then read the declaration backwards from it.

use super::{join_tokens, ParseError, Parser};
use crate::ast::{DecoratorList, MethodDecl, PropertyDecl};
use crate::token::{Token, TokenKind};

/// Qualifiers that may follow a method's parameter list.
const METHOD_QUALIFIERS: &[&str] = &["noexcept", "override", "final"];

/// Parse a data member declaration up to and including its `;`.
///
/// The boundary is the first top-level `=` or the `;`. The last name before
/// the boundary is the property name and everything ahead of it is the type.
/// A reflection marker before the `;` is an error and is left unconsumed so
/// the caller can parse it next.
pub fn parse_property(parser: &mut Parser) -> Result<PropertyDecl, ParseError> {
    let start = parser.position();
    let mut end = start;
    let mut boundary = None;
    let mut angle_depth = 0usize;

    loop {
        let tok = *parser.token_at(end);
        match tok.kind {
            TokenKind::Semicolon => break,
            TokenKind::Eof => {
                parser.seek(end);
                return Err(parser.unexpected("';'"));
            }
            kind if kind.is_reflection_marker() => {
                parser.seek(end);
                return Err(parser.unexpected("';'"));
            }
            TokenKind::Less => angle_depth += 1,
            TokenKind::Greater => angle_depth = angle_depth.saturating_sub(1),
            TokenKind::Equal if angle_depth == 0 && boundary.is_none() => boundary = Some(end),
            _ => {}
        }
        end += 1;
    }

    let boundary = boundary.unwrap_or(end);
    let tokens: Vec<Token> = (start..boundary).map(|i| *parser.token_at(i)).collect();
    parser.seek(end + 1);

    let (name_index, suffix) = locate_declarator(&tokens);
    let Some(name_index) = name_index else {
        let span = tokens.last().map_or(parser.token_at(end).span, |t| t.span);
        return Err(ParseError::missing_name("property", span, parser.path()));
    };
    let name_tok = tokens[name_index];

    if name_index == 0 {
        parser.warn(
            format!("Property '{}' has no type, declaration may be misparsed", name_tok.lexeme),
            name_tok.span,
        );
    }

    let mut ty = join_tokens(&tokens[..name_index]);
    ty.push_str(&suffix);

    tracing::trace!("property {} {}", ty, name_tok.lexeme);
    Ok(PropertyDecl {
        ty,
        name: name_tok.lexeme.to_string(),
        decorators: DecoratorList::new(),
        line: name_tok.span.line,
    })
}

/// Find the declared name in `tokens` (which end at the boundary).
///
/// Trailing `[N]` groups are kept as a type suffix and a trailing `{...}`
/// initializer is dropped.
fn locate_declarator(tokens: &[Token<'_>]) -> (Option<usize>, String) {
    let mut suffix_groups = Vec::new();
    let mut index = tokens.len();

    while index > 0 {
        let last = tokens[index - 1].kind;
        let (open, close) = match last {
            TokenKind::RightBracket => (TokenKind::LeftBracket, TokenKind::RightBracket),
            TokenKind::RightBrace => (TokenKind::LeftBrace, TokenKind::RightBrace),
            _ => break,
        };
        let Some(open_index) = matching_open(tokens, index - 1, open, close) else {
            break;
        };
        if close == TokenKind::RightBracket {
            suffix_groups.push(join_tokens(&tokens[open_index..index]));
        }
        index = open_index;
    }

    let name = index
        .checked_sub(1)
        .filter(|&i| tokens[i].kind == TokenKind::Identifier);
    suffix_groups.reverse();
    (name, suffix_groups.concat())
}

/// Index of the `open` token matching the `close` token at `close_index`.
fn matching_open(
    tokens: &[Token<'_>],
    close_index: usize,
    open: TokenKind,
    close: TokenKind,
) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=close_index).rev() {
        let kind = tokens[i].kind;
        if kind == close {
            depth += 1;
        } else if kind == open {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Parse a member function declaration, skipping any inline body.
///
/// The boundary is the first `;`, `{` or `=` outside the parameter list.
/// From there the scan walks back over qualifiers to the closing `)`, then
/// to its matching `(`; the token before it is the method name and
/// everything earlier is the return type.
pub fn parse_method(parser: &mut Parser) -> Result<MethodDecl, ParseError> {
    let start = parser.position();
    let mut boundary = start;
    let mut paren_depth = 0usize;

    loop {
        let tok = *parser.token_at(boundary);
        match tok.kind {
            TokenKind::Semicolon | TokenKind::LeftBrace | TokenKind::Equal if paren_depth == 0 => {
                break
            }
            TokenKind::Eof => {
                parser.seek(boundary);
                return Err(parser.unexpected("';'"));
            }
            kind if kind.is_reflection_marker() => {
                parser.seek(boundary);
                return Err(parser.unexpected("';'"));
            }
            TokenKind::LeftParen => paren_depth += 1,
            TokenKind::RightParen => paren_depth = paren_depth.saturating_sub(1),
            _ => {}
        }
        boundary += 1;
    }

    let tokens: Vec<Token> = (start..boundary).map(|i| *parser.token_at(i)).collect();
    parser.seek(boundary);
    skip_method_tail(parser)?;

    let mut close = tokens.len();
    while close > 0 && is_method_qualifier(&tokens[close - 1]) {
        close -= 1;
    }

    let Some(close_index) = close.checked_sub(1).filter(|&i| tokens[i].kind == TokenKind::RightParen)
    else {
        let found = if close > 0 { tokens[close - 1] } else { *parser.token_at(boundary) };
        return Err(ParseError::unexpected_token("')'", &found, parser.path()));
    };

    let open_index = matching_open(&tokens, close_index, TokenKind::LeftParen, TokenKind::RightParen)
        .ok_or_else(|| ParseError::unexpected_token("'('", &tokens[close_index], parser.path()))?;

    let name_tok = open_index
        .checked_sub(1)
        .map(|i| tokens[i])
        .filter(|t| t.kind == TokenKind::Identifier)
        .ok_or_else(|| {
            ParseError::missing_name("method", tokens[open_index].span, parser.path())
        })?;

    let return_ty = join_tokens(&tokens[..open_index - 1]);
    let params = join_tokens(&tokens[open_index + 1..close_index]);
    tracing::debug!("method {} {}({})", return_ty, name_tok.lexeme, params);

    Ok(MethodDecl {
        return_ty,
        name: name_tok.lexeme.to_string(),
        arguments: Vec::new(),
        decorators: DecoratorList::new(),
        line: name_tok.span.line,
    })
}

fn is_method_qualifier(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Const
        || (tok.kind == TokenKind::Identifier && METHOD_QUALIFIERS.contains(&tok.lexeme))
}

/// Consume the rest of the declaration from the boundary token: an inline
/// body, an `= 0;`/`= default;` tail, or a plain `;`.
fn skip_method_tail(parser: &mut Parser) -> Result<(), ParseError> {
    match parser.current().kind {
        TokenKind::LeftBrace => {
            let mut depth = 0usize;
            loop {
                match parser.current().kind {
                    TokenKind::LeftBrace => depth += 1,
                    TokenKind::RightBrace => {
                        depth -= 1;
                        if depth == 0 {
                            parser.advance();
                            break;
                        }
                    }
                    TokenKind::Eof => return Err(parser.unexpected("'}'")),
                    _ => {}
                }
                parser.advance();
            }
            parser.eat(TokenKind::Semicolon);
            Ok(())
        }
        TokenKind::Equal => {
            while !parser.check(TokenKind::Semicolon) {
                if parser.at_eof() || parser.current().kind.is_reflection_marker() {
                    return Err(parser.unexpected("';'"));
                }
                parser.advance();
            }
            parser.advance();
            Ok(())
        }
        _ => {
            parser.expect(TokenKind::Semicolon)?;
            Ok(())
        }
    }
}
