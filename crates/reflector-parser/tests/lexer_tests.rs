//! Token-level tests for the reflection lexer.

use reflector_parser::{LexError, Lexer, TokenKind};

fn assert_tokens(source: &str, expected: Vec<TokenKind>) {
    let (tokens, _) = Lexer::new(source).tokenize();
    let actual: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    // Expected should include EOF
    let mut expected_with_eof = expected;
    expected_with_eof.push(TokenKind::Eof);

    assert_eq!(actual, expected_with_eof, "Token mismatch for {:?}", source);
}

fn lexemes(source: &str) -> Vec<String> {
    Lexer::new(source)
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.lexeme.to_string())
        .collect()
}

#[test]
fn test_reflection_markers() {
    assert_tokens(
        "GPROPERTY GCLASS GSTRUCT GMETHOD GENUM GENERATED_BODY",
        vec![
            TokenKind::PropertyMarker,
            TokenKind::ClassMarker,
            TokenKind::StructMarker,
            TokenKind::MethodMarker,
            TokenKind::EnumMarker,
            TokenKind::GeneratedBody,
        ],
    );
}

#[test]
fn test_keywords() {
    assert_tokens(
        "class struct enum const auto",
        vec![
            TokenKind::Class,
            TokenKind::Struct,
            TokenKind::Enum,
            TokenKind::Const,
            TokenKind::Auto,
        ],
    );
}

#[test]
fn test_assignment_and_comparison_operators() {
    assert_tokens(
        "= += -= *= /= %= ^= &= |= <<= >>= == != <= >= < >",
        vec![
            TokenKind::Equal,
            TokenKind::PlusEqual,
            TokenKind::MinusEqual,
            TokenKind::StarEqual,
            TokenKind::SlashEqual,
            TokenKind::PercentEqual,
            TokenKind::CaretEqual,
            TokenKind::AmpEqual,
            TokenKind::PipeEqual,
            TokenKind::LessLessEqual,
            TokenKind::GreaterGreaterEqual,
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::Greater,
        ],
    );
}

#[test]
fn test_delimiters() {
    assert_tokens(
        "( ) { } [ ] ; : :: , # * &",
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::ColonColon,
            TokenKind::Comma,
            TokenKind::Hash,
            TokenKind::Star,
            TokenKind::Amp,
        ],
    );
}

#[test]
fn test_number_forms() {
    assert_eq!(
        lexemes("42 3.14 1e5 2.5E-3 7.e2 0x1F"),
        ["42", "3.14", "1e5", "2.5E-3", "7.e2", "0x1F"]
    );
}

#[test]
fn test_float_suffix_is_separate_identifier() {
    assert_tokens("1.0f", vec![TokenKind::Number, TokenKind::Identifier]);
}

#[test]
fn test_accented_identifiers() {
    assert_eq!(lexemes("Größe café _x9"), ["Größe", "café", "_x9"]);
}

#[test]
fn test_leading_digit_splits_identifier() {
    assert_tokens("9lives", vec![TokenKind::Number, TokenKind::Identifier]);
}

#[test]
fn test_string_literal_keeps_quotes() {
    assert_eq!(lexemes(r#"Tooltip("a \"b\" c")"#), ["Tooltip", "(", r#""a \"b\" c""#, ")"]);
}

#[test]
fn test_comments_are_skipped() {
    assert_tokens(
        "// GPROPERTY()\nint /* GCLASS() */ X; /* unterminated GENUM",
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Semicolon],
    );
}

#[test]
fn test_malformed_literals_are_dropped() {
    let (tokens, errors) = Lexer::new("A = 1.5e3.2;\nB = \"open").tokenize();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Eof,
        ]
    );
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], LexError::InvalidNumber { ref text, .. } if text == "1.5e3.2"));
    assert_eq!(errors[1].span().line, 2);
}

#[test]
fn test_preprocessor_lines() {
    assert_tokens(
        "#include \"Player.generated.h\"",
        vec![TokenKind::Hash, TokenKind::Identifier, TokenKind::String],
    );
}

#[test]
fn test_self_include_detection() {
    let source = "#pragma once\n#include \"Player.generated.h\"\n";
    let lexer = Lexer::new(source);
    assert!(lexer.includes_generated_header("Player"));
    assert!(!lexer.includes_generated_header("Enemy"));
    assert!(!lexer.has_reflection_markers());
}
